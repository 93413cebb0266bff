//! `Info.plist` descriptor rendering.
//!
//! Documentation browsers identify a docset by this property list. The
//! bundle name fills the identifier, display name, and platform family.

use std::io::Cursor;
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::debug;

use javadocset_shared::{JavadocsetError, PlistOptions, Result};

const PLIST_DOCTYPE: &str =
    r#"plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd""#;

/// Render the `Info.plist` XML for the docset `name`.
pub fn render_info_plist(name: &str, options: &PlistOptions) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(template_error)?;
    writer
        .write_event(Event::DocType(BytesText::from_escaped(PLIST_DOCTYPE)))
        .map_err(template_error)?;

    let mut plist = BytesStart::new("plist");
    plist.push_attribute(("version", "1.0"));
    writer.write_event(Event::Start(plist)).map_err(template_error)?;
    writer
        .write_event(Event::Start(BytesStart::new("dict")))
        .map_err(template_error)?;

    for (key, value) in [
        ("CFBundleIdentifier", name),
        ("CFBundleName", name),
        ("DocSetPlatformFamily", name),
        ("dashIndexFilePath", options.index_page.as_str()),
        ("DashDocSetFamily", options.docset_family.as_str()),
    ] {
        write_simple(&mut writer, "key", key)?;
        write_simple(&mut writer, "string", value)?;
    }

    write_simple(&mut writer, "key", "isDashDocset")?;
    writer
        .write_event(Event::Empty(BytesStart::new("true")))
        .map_err(template_error)?;

    writer
        .write_event(Event::End(BytesEnd::new("dict")))
        .map_err(template_error)?;
    writer
        .write_event(Event::End(BytesEnd::new("plist")))
        .map_err(template_error)?;

    let bytes = writer.into_inner().into_inner();
    let mut xml = String::from_utf8(bytes).map_err(template_error)?;
    xml.push('\n');
    Ok(xml)
}

/// Render and write `Info.plist` to `path`.
pub fn write_info_plist(path: &Path, name: &str, options: &PlistOptions) -> Result<()> {
    let xml = render_info_plist(name, options)?;
    std::fs::write(path, xml).map_err(|e| JavadocsetError::io(path, e))?;
    debug!(path = %path.display(), "wrote Info.plist");
    Ok(())
}

fn write_simple(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, value: &str) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(tag)))
        .map_err(template_error)?;
    writer
        .write_event(Event::Text(BytesText::new(value)))
        .map_err(template_error)?;
    writer
        .write_event(Event::End(BytesEnd::new(tag)))
        .map_err(template_error)?;
    Ok(())
}

fn template_error(err: impl std::fmt::Display) -> JavadocsetError {
    JavadocsetError::Template(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_fills_identifier_and_display_name() {
        let xml = render_info_plist("MyDocs", &PlistOptions::default()).expect("render");
        assert!(xml.contains("<key>CFBundleIdentifier</key>\n    <string>MyDocs</string>"));
        assert!(xml.contains("<key>CFBundleName</key>\n    <string>MyDocs</string>"));
        assert!(xml.contains("<key>DocSetPlatformFamily</key>\n    <string>MyDocs</string>"));
    }

    #[test]
    fn fixed_fields() {
        let xml = render_info_plist("MyDocs", &PlistOptions::default()).unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains("<!DOCTYPE plist PUBLIC"));
        assert!(xml.contains(r#"<plist version="1.0">"#));
        assert!(xml.contains("<string>overview-summary.html</string>"));
        assert!(xml.contains("<key>DashDocSetFamily</key>\n    <string>java</string>"));
        assert!(xml.contains("<key>isDashDocset</key>\n    <true/>"));
    }

    #[test]
    fn landing_page_override() {
        let options = PlistOptions {
            index_page: "index.html".into(),
            ..PlistOptions::default()
        };
        let xml = render_info_plist("Guava", &options).unwrap();
        assert!(xml.contains("<string>index.html</string>"));
        assert!(!xml.contains("overview-summary.html"));
    }

    #[test]
    fn names_are_escaped() {
        let xml = render_info_plist("Tom & <Jerry>", &PlistOptions::default()).unwrap();
        assert!(xml.contains("<string>Tom &amp; &lt;Jerry&gt;</string>"));
    }

    #[test]
    fn write_failure_is_io_error() {
        let path = std::env::temp_dir()
            .join(format!("javadocset-missing-{}", uuid::Uuid::now_v7()))
            .join("Info.plist");
        let err = write_info_plist(&path, "MyDocs", &PlistOptions::default()).unwrap_err();
        assert!(matches!(err, JavadocsetError::Io { .. }));
    }
}
