//! XML manifest templates (`config.xml`, `AndroidManifest.xml`).
//!
//! Substitution streams the document through quick-xml and rewrites only the
//! first selected element, so comments, declarations and whitespace of the
//! template survive untouched.

use super::{
    TemplateTransformer,
    selector::{Frame, Selector},
};
use crate::packager::{Error, Result, config::FieldBinding, error::ErrorExt};
use quick_xml::{
    Reader, Writer,
    events::{BytesStart, BytesText, Event},
};
use std::path::{Path, PathBuf};

/// An XML template held in memory while bindings are applied.
#[derive(Debug, Clone)]
pub struct XmlTemplate {
    template: PathBuf,
    document: String,
}

impl XmlTemplate {
    /// Reads the template at `template`.
    pub async fn load(template: &Path) -> Result<Self> {
        let document = tokio::fs::read_to_string(template)
            .await
            .fs_context("reading template", template)?;
        Ok(Self::from_document(template, document))
    }

    /// Wraps template text already in memory.
    pub fn from_document(template: impl Into<PathBuf>, document: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            document: document.into(),
        }
    }

    /// Current document text.
    pub fn document(&self) -> &str {
        &self.document
    }
}

impl TemplateTransformer for XmlTemplate {
    fn replace(&mut self, binding: &FieldBinding, value: &str) -> Result<()> {
        let selector = Selector::parse(&binding.selector).ok_or_else(|| Error::Configuration {
            path: self.template.clone(),
            reason: format!("unsupported selector '{}'", binding.selector),
        })?;

        let rewritten = rewrite(&self.document, &selector, binding.attribute.as_deref(), value)
            .map_err(|reason| Error::TemplateSyntax {
                template: self.template.clone(),
                reason,
            })?;

        match rewritten {
            Some(document) => {
                self.document = document;
                Ok(())
            }
            None => Err(Error::TemplateBindingNotFound {
                template: self.template.clone(),
                selector: binding.selector.clone(),
            }),
        }
    }

    fn render(&self) -> Result<Vec<u8>> {
        Ok(self.document.clone().into_bytes())
    }
}

/// Rewrites the first element selected by `selector`.
///
/// With `attribute` set, that attribute is replaced or appended. Otherwise the
/// element's leading text is replaced; child elements are kept. Returns
/// `Ok(None)` when nothing is selected.
fn rewrite(
    document: &str,
    selector: &Selector,
    attribute: Option<&str>,
    value: &str,
) -> std::result::Result<Option<String>, String> {
    let mut reader = Reader::from_str(document);
    let mut writer = Writer::new(Vec::with_capacity(document.len() + value.len()));
    let mut path: Vec<Frame> = Vec::new();
    let mut matched = false;
    let mut dropping_text = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("at byte {}: {e}", reader.buffer_position()))?;

        // Old text of the rewritten element is dropped up to its first child
        // or end tag, comments in between are kept.
        if dropping_text {
            match &event {
                Event::Text(_) | Event::CData(_) => continue,
                Event::Start(_) | Event::Empty(_) | Event::End(_) | Event::Eof => {
                    dropping_text = false
                }
                _ => {}
            }
        }

        match event {
            Event::Eof => break,
            Event::Start(start) => {
                path.push(frame(&start)?);
                if !matched && selector.matches(&path) {
                    matched = true;
                    match attribute {
                        Some(attr) => {
                            write(&mut writer, Event::Start(rebuilt(&start, Some((attr, value)))?))?
                        }
                        None => {
                            write(&mut writer, Event::Start(start))?;
                            write(&mut writer, Event::Text(BytesText::new(value)))?;
                            dropping_text = true;
                        }
                    }
                } else {
                    write(&mut writer, Event::Start(start))?;
                }
            }
            Event::Empty(start) => {
                path.push(frame(&start)?);
                if !matched && selector.matches(&path) {
                    matched = true;
                    match attribute {
                        Some(attr) => {
                            write(&mut writer, Event::Empty(rebuilt(&start, Some((attr, value)))?))?
                        }
                        None => {
                            let end = start.to_end().into_owned();
                            write(&mut writer, Event::Start(rebuilt(&start, None)?))?;
                            write(&mut writer, Event::Text(BytesText::new(value)))?;
                            write(&mut writer, Event::End(end))?;
                        }
                    }
                } else {
                    write(&mut writer, Event::Empty(start))?;
                }
                path.pop();
            }
            Event::End(end) => {
                path.pop();
                write(&mut writer, Event::End(end))?;
            }
            other => write(&mut writer, other)?,
        }
    }

    if !matched {
        return Ok(None);
    }

    String::from_utf8(writer.into_inner())
        .map(Some)
        .map_err(|e| e.to_string())
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> std::result::Result<(), String> {
    writer.write_event(event).map_err(|e| e.to_string())
}

fn frame(start: &BytesStart<'_>) -> std::result::Result<Frame, String> {
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        attributes.push((
            String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            String::from_utf8_lossy(&attr.value).into_owned(),
        ));
    }
    Ok(Frame {
        name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
        attributes,
    })
}

/// Normalized copy of `start`, optionally with one attribute set.
///
/// Attribute order is kept; a new attribute is appended.
fn rebuilt(
    start: &BytesStart<'_>,
    set: Option<(&str, &str)>,
) -> std::result::Result<BytesStart<'static>, String> {
    let mut updated = BytesStart::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    let mut pending = set;
    for attr in start.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        match set {
            Some((name, value)) if attr.key.as_ref() == name.as_bytes() => {
                updated.push_attribute((name, value));
                pending = None;
            }
            _ => updated.push_attribute(attr),
        }
    }
    if let Some(attribute) = pending {
        updated.push_attribute(attribute);
    }
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG_XML: &str = r#"<?xml version='1.0' encoding='utf-8'?>
<widget id="com.example.placeholder" version="1.0.0" xmlns="http://www.w3.org/ns/widgets">
    <!-- brand fields below -->
    <name>Placeholder</name>
    <description>
        Placeholder description
    </description>
    <preference name="Orientation" value="portrait" />
    <author email="dev@example.com" />
</widget>
"#;

    fn binding(field: &str, selector: &str, attribute: Option<&str>) -> FieldBinding {
        FieldBinding {
            field: field.into(),
            selector: selector.into(),
            attribute: attribute.map(str::to_string),
        }
    }

    fn template() -> XmlTemplate {
        XmlTemplate::from_document("www/config.xml.template", CONFIG_XML)
    }

    #[test]
    fn replaces_element_text() {
        let mut xml = template();
        xml.replace(&binding("projectName", "name", None), "Acme").unwrap();
        assert!(xml.document().contains("<name>Acme</name>"));
        assert!(!xml.document().contains("Placeholder</name>"));
        assert!(xml.document().contains("<!-- brand fields below -->"));
        assert!(xml.document().starts_with("<?xml version='1.0' encoding='utf-8'?>"));
    }

    #[test]
    fn replaces_multiline_text() {
        let mut xml = template();
        xml.replace(&binding("description", "./description", None), "Acme files")
            .unwrap();
        assert!(xml.document().contains("<description>Acme files</description>"));
    }

    #[test]
    fn text_after_comment_is_replaced_too() {
        let mut xml = XmlTemplate::from_document(
            "config.xml.template",
            "<widget><name><!-- brand -->Old<![CDATA[ More]]></name><author/></widget>",
        );
        xml.replace(&binding("projectName", "name", None), "Acme").unwrap();
        assert_eq!(
            xml.document(),
            "<widget><name>Acme<!-- brand --></name><author/></widget>"
        );
    }

    #[test]
    fn sets_root_attribute() {
        let mut xml = template();
        xml.replace(&binding("identifier", ".", Some("id")), "com.acme.app").unwrap();
        assert!(xml.document().contains(r#"id="com.acme.app""#));
        assert!(xml.document().contains(r#"version="1.0.0""#));
        assert!(!xml.document().contains("com.example.placeholder"));
    }

    #[test]
    fn predicate_selects_empty_element() {
        let mut xml = template();
        xml.replace(
            &binding("orientation", "preference[@name='Orientation']", Some("value")),
            "landscape",
        )
        .unwrap();
        assert!(xml.document().contains(r#"<preference name="Orientation" value="landscape"/>"#));
    }

    #[test]
    fn text_into_empty_element_expands_it() {
        let mut xml = template();
        xml.replace(&binding("projectName", "author", None), "Acme Inc.").unwrap();
        assert!(xml.document().contains(r#"<author email="dev@example.com">Acme Inc.</author>"#));
    }

    #[test]
    fn values_are_escaped() {
        let mut xml = template();
        xml.replace(&binding("projectName", "name", None), "A & B <Co>").unwrap();
        assert!(xml.document().contains("<name>A &amp; B &lt;Co&gt;</name>"));
    }

    #[test]
    fn last_write_wins() {
        let mut xml = template();
        xml.replace(&binding("a", "name", None), "First").unwrap();
        xml.replace(&binding("b", "name", None), "Second").unwrap();
        assert!(xml.document().contains("<name>Second</name>"));
    }

    #[test]
    fn unmatched_selector_is_an_error() {
        let mut xml = template();
        let err = xml
            .replace(&binding("projectName", "application/activity", Some("label")), "Acme")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::TemplateBindingNotFound { ref selector, .. } if selector == "application/activity"
        ));
        assert_eq!(xml.document(), CONFIG_XML);
    }

    #[test]
    fn prefixed_attributes_keep_prefix() {
        let manifest = r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android" package="x">
  <application android:label="Old" android:icon="@drawable/icon"><activity android:name="Main"/></application>
</manifest>"#;
        let mut xml = XmlTemplate::from_document("AndroidManifest.xml.template", manifest);
        xml.replace(&binding("identifier", ".", Some("package")), "com.acme.app").unwrap();
        xml.replace(&binding("projectName", "application", Some("android:label")), "Acme")
            .unwrap();

        let out = xml.document();
        assert!(out.contains(r#"package="com.acme.app""#));
        assert!(out.contains(r#"<application android:label="Acme" android:icon="@drawable/icon">"#));
        assert!(out.contains(r#"<activity android:name="Main"/>"#));
    }

    #[test]
    fn malformed_template_is_reported() {
        let mut xml = XmlTemplate::from_document("bad.xml.template", "<widget><name></widget>");
        let err = xml.replace(&binding("projectName", "name", None), "Acme").unwrap_err();
        assert!(matches!(err, Error::TemplateSyntax { .. }));
    }
}
