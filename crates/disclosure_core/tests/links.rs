use disclosure_core::{extract_pdf_urls, find_pdf_urls, remove_duplicates};
use pretty_assertions::assert_eq;

const LINK_A: &str = "https://churchdwight.com/pdf/?productID=40002569";
const LINK_B: &str = "http://cdn.example.com/ingredients/pdf/?productID=42";

#[test]
fn repeated_link_is_returned_once_in_first_seen_position() {
    let html = format!(
        r#"<a href="{LINK_A}">one</a> <a href='{LINK_B}'>two</a>
           <a href="{LINK_A}">again</a> {LINK_A}"#
    );

    assert_eq!(find_pdf_urls(&html).len(), 4);
    assert_eq!(extract_pdf_urls(&html), vec![LINK_A, LINK_B]);
}

#[test]
fn quotes_and_whitespace_bound_a_match() {
    let html = format!(r#"<a href="{LINK_A}&lang=fr">x</a>"#);
    assert_eq!(extract_pdf_urls(&html), vec![LINK_A]);
}

#[test]
fn non_matching_links_are_ignored() {
    let html = r#"
        <a href="/pdf/?productID=1">relative</a>
        <a href="https://x.com/pdf/?productID=">no digits</a>
        <a href="https://x.com/doc.pdf">plain pdf</a>
        <a href="ftp://x.com/pdf/?productID=7">wrong scheme</a>
    "#;
    assert!(extract_pdf_urls(html).is_empty());
}

#[test]
fn concatenated_bodies_keep_page_order() {
    let first = format!(r#"<a href="{LINK_B}">b</a>"#);
    let second = format!(r#"<a href="{LINK_A}">a</a><a href="{LINK_B}">b</a>"#);
    let blob = [first, String::new(), second].concat();
    assert_eq!(extract_pdf_urls(&blob), vec![LINK_B, LINK_A]);
}

#[test]
fn remove_duplicates_preserves_order() {
    let items = ["c", "a", "c", "b", "a"].map(String::from);
    assert_eq!(remove_duplicates(items), vec!["c", "a", "b"]);
}
