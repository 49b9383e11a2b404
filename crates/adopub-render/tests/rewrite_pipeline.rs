//! End-to-end rewrite of a realistic asciidoctor XHTML5 rendering.

use pretty_assertions::assert_eq;

use adopub_render::{Document, rename_header_anchor};

const RENDERED: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml" lang="en">
<head>
<meta charset="UTF-8"/>
<title>release notes 2.4</title>
<style>
#header{margin:0}
#header .details{color:gray}
</style>
</head>
<body class="article">
<div id="header">
<h1>Release Notes 2.4</h1>
</div>
<div id="content">
<div class="paragraph">
<p>See <a href="#header">top</a> for details &#8212; or the chart below.</p>
</div>
<div class="imageblock">
<div class="content">
<img src="images/chart.png" alt="chart" />
</div>
</div>
</div>
</body>
</html>
"##;

#[test]
fn full_rewrite_pass() {
    let renamed = rename_header_anchor(RENDERED);
    assert!(!renamed.contains(r#"id="header""#));
    assert!(renamed.contains(r#"id="header-adoc""#));
    assert!(renamed.contains("#header-adoc{margin:0}"));
    assert!(renamed.contains(r##"href="#header-adoc""##));

    let mut doc = Document::parse(&renamed).unwrap();

    assert_eq!(doc.title().unwrap(), "Release Notes 2.4");

    let refs = doc.image_refs();
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0].1, "images/chart.png");

    doc.set_image_src(refs[0].0, "/download/attachments/777/chart.png");
    doc.remove_headings();

    let body = doc.body_fragment().unwrap();
    assert!(!body.contains("<h1>"));
    assert!(body.contains(r#"src="/download/attachments/777/chart.png""#));
    assert!(body.contains("See <a href=\"#header-adoc\">top</a> for details \u{2014} or the chart below."));
}

#[test]
fn fragment_input_parses_without_prolog() {
    let doc = Document::parse(
        "<head><title>guide</title></head><body><p>plain</p></body>",
    )
    .unwrap();

    assert_eq!(doc.title().unwrap(), "Guide");
    assert_eq!(doc.body_fragment().unwrap(), "<p>plain</p>");
}
