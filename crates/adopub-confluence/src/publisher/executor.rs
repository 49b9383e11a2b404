//! Publish pipeline implementation.

use std::path::Path;

use adopub_render::{Document, rename_header_anchor};
use tracing::{info, warn};

use crate::store::RemoteStore;
use crate::types::Page;

use super::PublishConfig;
use super::error::PublishError;
use super::result::{PublishAction, PublishResult};

/// Macro id of the style block. Fixed so repeated publishes produce
/// byte-identical storage content.
const STYLE_MACRO_ID: &str = "d5e0bec5-bf2c-44d8-a525-93c76adb561e";

/// Handles publishing a rendered document to Confluence.
pub struct PagePublisher<'a, S: RemoteStore> {
    store: &'a S,
    config: PublishConfig,
}

impl<'a, S: RemoteStore> PagePublisher<'a, S> {
    /// Create a new page publisher.
    #[must_use]
    pub fn new(store: &'a S, config: PublishConfig) -> Self {
        Self { store, config }
    }

    /// Publish a rendered XHTML document as a Confluence page.
    ///
    /// Images referenced relative to `document_dir` are uploaded as
    /// attachments of the parent page and their `src` rewritten to the
    /// returned download links. Exactly one page is created or updated,
    /// keyed by `(space key, title)`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the XHTML cannot be parsed or has no `<title>`/`<body>`
    /// - a referenced image file cannot be read
    /// - Confluence API calls fail
    pub fn publish(
        &self,
        xhtml: &str,
        document_dir: &Path,
        stylesheet: &str,
    ) -> Result<PublishResult, PublishError> {
        // Raw-text rewrite before parsing: the rename targets attribute
        // values and embedded CSS, not tags.
        let renamed = rename_header_anchor(xhtml);
        let mut document = Document::parse(&renamed)?;

        let (images_uploaded, images_skipped) =
            self.upload_images(&mut document, document_dir)?;

        document.remove_headings();
        let title = document.title()?;
        info!("Extracted page title '{}'", title);

        let body = wrap_body(&document.body_fragment()?, stylesheet);

        let existing = self.store.find_page(&self.config.space_key, &title)?;
        let (page, action) = match existing {
            Some(current) => self.update(current, &title, &body)?,
            None => {
                let page = self.store.create_page(
                    &self.config.space_key,
                    &title,
                    &body,
                    &self.config.parent_page_id,
                )?;
                (page, PublishAction::Created)
            }
        };

        Ok(PublishResult {
            page,
            action,
            images_uploaded,
            images_skipped,
        })
    }

    /// Upload every referenced image and relink its `src`.
    ///
    /// Uploads run strictly sequentially in document order. A response
    /// without a download link skips the relink for that image but does
    /// not abort the pipeline.
    fn upload_images(
        &self,
        document: &mut Document,
        document_dir: &Path,
    ) -> Result<(usize, Vec<String>), PublishError> {
        let refs = document.image_refs();
        let mut uploaded = 0;
        let mut skipped = Vec::new();

        for (handle, src) in refs {
            let path = document_dir.join(&src);
            let filename = basename(&src);
            let data = std::fs::read(&path)?;

            info!("Uploading image '{}' ({} bytes)", filename, data.len());

            let response = self.store.attach_content(
                &self.config.parent_page_id,
                filename,
                &data,
                content_type_for(filename),
            )?;

            if let Some(link) = response.download_link() {
                document.set_image_src(handle, link);
                uploaded += 1;
            } else {
                warn!(
                    "Attach response for '{}' carried no download link, keeping original src",
                    src
                );
                skipped.push(src);
            }
        }

        Ok((uploaded, skipped))
    }

    /// Update an existing page, honoring the `skip_unchanged` policy.
    fn update(
        &self,
        current: Page,
        title: &str,
        body: &str,
    ) -> Result<(Page, PublishAction), PublishError> {
        if self.config.skip_unchanged && current.storage_body() == Some(body) {
            info!("Page {} content is already up to date", current.id);
            return Ok((current, PublishAction::Unchanged));
        }

        let page = self
            .store
            .update_page(&current.id, title, body, current.version.number)?;
        Ok((page, PublishAction::Updated))
    }
}

/// Wrap the body fragment in the fixed page envelope: a cursor-target
/// spacer and a style macro carrying the stylesheet, scoped to `html`.
fn wrap_body(fragment: &str, stylesheet: &str) -> String {
    format!(
        "<div>\n\
         <p class=\"auto-cursor-target\"><br /></p>\n\
         <ac:structured-macro ac:macro-id=\"{STYLE_MACRO_ID}\" ac:name=\"style\" ac:schema-version=\"1\">\n\
         <ac:plain-text-body><![CDATA[html {stylesheet}]]></ac:plain-text-body>\n\
         </ac:structured-macro>\n\
         </div>\n\
         {fragment}"
    )
}

/// File name component of an image reference.
fn basename(src: &str) -> &str {
    Path::new(src)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(src)
}

/// Content type derived from the file extension.
fn content_type_for(filename: &str) -> &'static str {
    match Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use crate::error::ConfluenceError;
    use crate::types::{AttachResponse, Body, Storage, Version};

    use super::*;

    /// In-memory remote store recording every call.
    #[derive(Default)]
    struct StubStore {
        pages: RefCell<Vec<Page>>,
        next_id: Cell<u64>,
        attach_calls: RefCell<Vec<(String, String)>>,
        attach_responses: RefCell<VecDeque<AttachResponse>>,
        create_calls: Cell<usize>,
        update_calls: Cell<usize>,
        last_written_body: RefCell<Option<String>>,
    }

    impl StubStore {
        fn new() -> Self {
            let store = Self::default();
            store.next_id.set(1000);
            store
        }

        fn with_page(self, id: &str, title: &str, version: u32) -> Self {
            self.pages.borrow_mut().push(Page {
                id: id.to_owned(),
                title: title.to_owned(),
                version: Version { number: version },
                body: None,
            });
            self
        }

        /// Queue a canned attach response; when the queue is empty a
        /// bulk response with a deterministic link is returned.
        fn queue_attach_response(&self, response: AttachResponse) {
            self.attach_responses.borrow_mut().push_back(response);
        }

        fn attached_filenames(&self) -> Vec<String> {
            self.attach_calls
                .borrow()
                .iter()
                .map(|(_, name)| name.clone())
                .collect()
        }
    }

    impl RemoteStore for StubStore {
        fn find_page(
            &self,
            _space_key: &str,
            title: &str,
        ) -> Result<Option<Page>, ConfluenceError> {
            Ok(self
                .pages
                .borrow()
                .iter()
                .find(|p| p.title == title)
                .cloned())
        }

        fn create_page(
            &self,
            _space_key: &str,
            title: &str,
            body: &str,
            _parent_id: &str,
        ) -> Result<Page, ConfluenceError> {
            self.create_calls.set(self.create_calls.get() + 1);
            self.next_id.set(self.next_id.get() + 1);
            *self.last_written_body.borrow_mut() = Some(body.to_owned());

            let page = Page {
                id: self.next_id.get().to_string(),
                title: title.to_owned(),
                version: Version { number: 1 },
                body: Some(Body {
                    storage: Some(Storage {
                        value: body.to_owned(),
                    }),
                }),
            };
            self.pages.borrow_mut().push(page.clone());
            Ok(page)
        }

        fn update_page(
            &self,
            page_id: &str,
            title: &str,
            body: &str,
            version: u32,
        ) -> Result<Page, ConfluenceError> {
            self.update_calls.set(self.update_calls.get() + 1);
            *self.last_written_body.borrow_mut() = Some(body.to_owned());

            let mut pages = self.pages.borrow_mut();
            let page = pages
                .iter_mut()
                .find(|p| p.id == page_id)
                .expect("update of unknown page");
            page.title = title.to_owned();
            page.version = Version {
                number: version + 1,
            };
            page.body = Some(Body {
                storage: Some(Storage {
                    value: body.to_owned(),
                }),
            });
            Ok(page.clone())
        }

        fn attach_content(
            &self,
            page_id: &str,
            filename: &str,
            _data: &[u8],
            _content_type: &str,
        ) -> Result<AttachResponse, ConfluenceError> {
            self.attach_calls
                .borrow_mut()
                .push((page_id.to_owned(), filename.to_owned()));

            Ok(self
                .attach_responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| {
                    AttachResponse::Bulk(format!("/download/attachments/{page_id}/{filename}"))
                }))
        }
    }

    fn config() -> PublishConfig {
        PublishConfig {
            space_key: "DOCS".to_owned(),
            parent_page_id: "777".to_owned(),
            skip_unchanged: false,
        }
    }

    fn write_image(dir: &TempDir, name: &str) {
        std::fs::write(dir.path().join(name), b"fake-image-bytes").unwrap();
    }

    const SIMPLE_DOC: &str = "<html><head><title>sample doc</title></head>\
                              <body><h1>Title</h1><p>content</p></body></html>";

    #[test]
    fn test_create_branch_when_page_absent() {
        let store = StubStore::new();
        let publisher = PagePublisher::new(&store, config());

        let result = publisher
            .publish(SIMPLE_DOC, Path::new("."), "body{color:red}")
            .unwrap();

        assert_eq!(result.action, PublishAction::Created);
        assert_eq!(result.page.title, "Sample Doc");
        assert_eq!(store.create_calls.get(), 1);
        assert_eq!(store.update_calls.get(), 0);
    }

    #[test]
    fn test_update_branch_when_page_exists() {
        let store = StubStore::new().with_page("42", "Sample Doc", 3);
        let publisher = PagePublisher::new(&store, config());

        let result = publisher
            .publish(SIMPLE_DOC, Path::new("."), "body{color:red}")
            .unwrap();

        assert_eq!(result.action, PublishAction::Updated);
        assert_eq!(result.page.id, "42");
        assert_eq!(result.page.version.number, 4);
        assert_eq!(store.create_calls.get(), 0);
        assert_eq!(store.update_calls.get(), 1);
    }

    #[test]
    fn test_publish_twice_is_idempotent() {
        let store = StubStore::new();
        let publisher = PagePublisher::new(&store, config());

        let first = publisher
            .publish(SIMPLE_DOC, Path::new("."), "body{color:red}")
            .unwrap();
        let second = publisher
            .publish(SIMPLE_DOC, Path::new("."), "body{color:red}")
            .unwrap();

        assert_eq!(first.action, PublishAction::Created);
        assert_eq!(second.action, PublishAction::Updated);
        assert_eq!(first.page.id, second.page.id);
        assert_eq!(store.create_calls.get(), 1);
        assert_eq!(store.update_calls.get(), 1);
    }

    #[test]
    fn test_uploads_images_in_document_order() {
        let dir = TempDir::new().unwrap();
        for name in ["a.png", "b.png", "c.png"] {
            write_image(&dir, name);
        }

        let xhtml = "<html><head><title>doc</title></head><body>\
                     <p><img src=\"a.png\" /></p>\
                     <p><img src=\"b.png\" /><img src=\"c.png\" /></p>\
                     </body></html>";

        let store = StubStore::new();
        let publisher = PagePublisher::new(&store, config());
        let result = publisher.publish(xhtml, dir.path(), "").unwrap();

        assert_eq!(result.images_uploaded, 3);
        assert_eq!(store.attached_filenames(), vec!["a.png", "b.png", "c.png"]);
        // Attachments go to the parent page
        assert!(store.attach_calls.borrow().iter().all(|(id, _)| id == "777"));

        let body = store.last_written_body.borrow().clone().unwrap();
        assert!(body.contains(r#"src="/download/attachments/777/b.png""#));
    }

    #[test]
    fn test_skips_relink_when_no_download_link() {
        let dir = TempDir::new().unwrap();
        write_image(&dir, "a.png");
        write_image(&dir, "b.png");

        let xhtml = "<html><head><title>doc</title></head><body>\
                     <p><img src=\"a.png\" /><img src=\"b.png\" /></p>\
                     </body></html>";

        let store = StubStore::new();
        store.queue_attach_response(AttachResponse::NoLink);

        let publisher = PagePublisher::new(&store, config());
        let result = publisher.publish(xhtml, dir.path(), "").unwrap();

        // Both uploads happened, only the second was relinked
        assert_eq!(store.attached_filenames().len(), 2);
        assert_eq!(result.images_uploaded, 1);
        assert_eq!(result.images_skipped, vec!["a.png".to_owned()]);

        let body = store.last_written_body.borrow().clone().unwrap();
        assert!(body.contains(r#"src="a.png""#));
        assert!(body.contains(r#"src="/download/attachments/777/b.png""#));
    }

    #[test]
    fn test_single_attach_response_relinks_too() {
        let dir = TempDir::new().unwrap();
        write_image(&dir, "a.png");

        let xhtml = "<html><head><title>doc</title></head><body>\
                     <p><img src=\"a.png\" /></p></body></html>";

        let store = StubStore::new();
        store.queue_attach_response(AttachResponse::Single("/download/updated/a.png".to_owned()));

        let publisher = PagePublisher::new(&store, config());
        let result = publisher.publish(xhtml, dir.path(), "").unwrap();

        assert_eq!(result.images_uploaded, 1);
        let body = store.last_written_body.borrow().clone().unwrap();
        assert!(body.contains(r#"src="/download/updated/a.png""#));
    }

    #[test]
    fn test_missing_image_file_aborts() {
        let dir = TempDir::new().unwrap();

        let xhtml = "<html><head><title>doc</title></head><body>\
                     <p><img src=\"missing.png\" /></p></body></html>";

        let store = StubStore::new();
        let publisher = PagePublisher::new(&store, config());
        let result = publisher.publish(xhtml, dir.path(), "");

        assert!(matches!(result, Err(PublishError::Io(_))));
        // No page was touched
        assert_eq!(store.create_calls.get(), 0);
        assert_eq!(store.update_calls.get(), 0);
    }

    #[test]
    fn test_envelope_carries_stylesheet() {
        let store = StubStore::new();
        let publisher = PagePublisher::new(&store, config());

        publisher
            .publish(SIMPLE_DOC, Path::new("."), "body{color:red}")
            .unwrap();

        let body = store.last_written_body.borrow().clone().unwrap();
        assert!(body.contains("<![CDATA[html body{color:red}]]>"));
        assert!(body.contains(r#"<p class="auto-cursor-target"><br /></p>"#));
        assert!(body.contains(r#"ac:name="style""#));
    }

    #[test]
    fn test_skip_unchanged_short_circuits_second_run() {
        let store = StubStore::new();
        let config = PublishConfig {
            skip_unchanged: true,
            ..config()
        };
        let publisher = PagePublisher::new(&store, config);

        let first = publisher
            .publish(SIMPLE_DOC, Path::new("."), "body{color:red}")
            .unwrap();
        let second = publisher
            .publish(SIMPLE_DOC, Path::new("."), "body{color:red}")
            .unwrap();

        assert_eq!(first.action, PublishAction::Created);
        assert_eq!(second.action, PublishAction::Unchanged);
        assert_eq!(second.page.id, first.page.id);
        assert_eq!(store.update_calls.get(), 0);
    }

    #[test]
    fn test_missing_title_is_fatal() {
        let store = StubStore::new();
        let publisher = PagePublisher::new(&store, config());

        let result = publisher.publish("<body><p>no title</p></body>", Path::new("."), "");
        assert!(matches!(result, Err(PublishError::Xhtml(_))));
    }

    #[test]
    fn test_end_to_end_scenario() {
        let dir = TempDir::new().unwrap();
        write_image(&dir, "diagram.png");

        let xhtml = "<html><head><title>sample doc</title></head>\
                     <body><div id=\"header\"><h1>Title</h1></div>\
                     <p><img src=\"diagram.png\" /></p></body></html>";

        let store = StubStore::new();
        let publisher = PagePublisher::new(&store, config());
        let result = publisher.publish(xhtml, dir.path(), "body{color:red}").unwrap();

        assert_eq!(result.page.title, "Sample Doc");

        let body = store.last_written_body.borrow().clone().unwrap();
        assert!(!body.contains("<h1>"));
        assert!(!body.contains(r#"id="header""#));
        assert!(body.contains(r#"id="header-adoc""#));
        assert!(body.contains(r#"src="/download/attachments/777/diagram.png""#));
        assert!(body.contains("<![CDATA[html body{color:red}]]>"));
    }

    #[test]
    fn test_nested_image_path_uses_basename() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("images")).unwrap();
        std::fs::write(dir.path().join("images/chart.png"), b"bytes").unwrap();

        let xhtml = "<html><head><title>doc</title></head><body>\
                     <p><img src=\"images/chart.png\" /></p></body></html>";

        let store = StubStore::new();
        let publisher = PagePublisher::new(&store, config());
        publisher.publish(xhtml, dir.path(), "").unwrap();

        assert_eq!(store.attached_filenames(), vec!["chart.png"]);
    }

    #[test]
    fn test_content_type_for_extensions() {
        assert_eq!(content_type_for("a.png"), "image/png");
        assert_eq!(content_type_for("a.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("a.svg"), "image/svg+xml");
        assert_eq!(content_type_for("a.bin"), "application/octet-stream");
    }
}
