//! Rewrite the path data of every `<path>`, `<polygon>` and `<polyline>` in
//! an SVG document.

use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};
use tokio::task::JoinSet;
use tracing::debug;

use crate::errors::{Error, Result};
use crate::path::Path;
use crate::settings::ExportSettings;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Target {
    /// `d` attribute of `<path>`
    PathData,
    /// `points` attribute of `<polygon>` / `<polyline>`
    Points,
}

impl Target {
    fn of(element: &BytesStart) -> Option<Self> {
        match element.local_name().as_ref() {
            b"path" => Some(Target::PathData),
            b"polygon" | b"polyline" => Some(Target::Points),
            _ => None,
        }
    }

    fn attr(&self) -> &'static str {
        match self {
            Target::PathData => "d",
            Target::Points => "points",
        }
    }

    fn settings(&self, settings: &ExportSettings) -> ExportSettings {
        ExportSettings {
            to_polygon: settings.to_polygon || *self == Target::Points,
            ..settings.clone()
        }
    }
}

/// Optimize all path data in an SVG document.
///
/// Attribute values which can't be parsed are left as they are.
pub fn optimize_svg_paths(input: &str, settings: &ExportSettings) -> Result<String> {
    settings.validate()?;
    rewrite_document(input, |target, value| {
        Ok(optimize_value(value, &target.settings(settings)))
    })
}

/// As `optimize_svg_paths`, exporting each attribute value as a separate
/// task on the current tokio runtime.
pub async fn optimize_svg_paths_async(input: &str, settings: &ExportSettings) -> Result<String> {
    settings.validate()?;
    let mut values = Vec::new();
    rewrite_document(input, |target, value| {
        values.push((target, value.to_string()));
        Ok(None)
    })?;

    let count = values.len();
    let mut tasks = JoinSet::new();
    for (index, (target, value)) in values.into_iter().enumerate() {
        let settings = ExportSettings {
            async_export: true,
            ..target.settings(settings)
        };
        tasks.spawn(async move {
            let result = match Path::parse(&value) {
                Ok(path) => path.export_async(&settings).await,
                Err(err) => Err(err),
            };
            (index, result)
        });
    }

    let mut results = vec![None; count];
    while let Some(joined) = tasks.join_next().await {
        let (index, result) = joined.map_err(Error::from_err)?;
        results[index] = match result {
            Ok(data) => Some(data),
            Err(err) => {
                debug!(%err, "leaving path data unchanged");
                None
            }
        };
    }
    let mut results = results.into_iter();
    rewrite_document(input, |_, _| Ok(results.next().flatten()))
}

fn optimize_value(value: &str, settings: &ExportSettings) -> Option<String> {
    match Path::parse(value).and_then(|path| path.export(settings)) {
        Ok(data) => Some(data),
        Err(err) => {
            debug!(%err, value, "leaving path data unchanged");
            None
        }
    }
}

/// Stream `input` through unchanged, except for the path data attributes,
/// which are replaced by `rewrite` when it returns a new value.
fn rewrite_document<F>(input: &str, mut rewrite: F) -> Result<String>
where
    F: FnMut(Target, &str) -> Result<Option<String>>,
{
    let mut reader = Reader::from_str(input);
    let mut writer = Writer::new(Vec::new());
    loop {
        let event = reader.read_event().map_err(|e| {
            Error::Document(format!(
                "XML error near position {}: {e}",
                reader.buffer_position()
            ))
        })?;
        let event = match event {
            Event::Eof => break,
            Event::Start(element) => Event::Start(rewrite_element(element, &mut rewrite)?),
            Event::Empty(element) => Event::Empty(rewrite_element(element, &mut rewrite)?),
            other => other,
        };
        writer.write_event(event).map_err(Error::from_err)?;
    }
    String::from_utf8(writer.into_inner())
        .map_err(|e| Error::Document(format!("output is not UTF-8: {e}")))
}

fn rewrite_element<'a, F>(element: BytesStart<'a>, rewrite: &mut F) -> Result<BytesStart<'a>>
where
    F: FnMut(Target, &str) -> Result<Option<String>>,
{
    let Some(target) = Target::of(&element) else {
        return Ok(element);
    };
    let name = String::from_utf8(element.name().as_ref().to_vec())
        .map_err(|e| Error::Document(e.to_string()))?;
    let mut rewritten = BytesStart::new(name);
    for attr in element.attributes() {
        let attr = attr.map_err(|e| Error::Document(e.to_string()))?;
        let key = String::from_utf8(attr.key.as_ref().to_vec())
            .map_err(|e| Error::Document(e.to_string()))?;
        // re-escaped on write; the original quote style is not kept
        let value = attr
            .unescape_value()
            .map_err(|e| Error::Document(e.to_string()))?;
        if key == target.attr() {
            if let Some(data) = rewrite(target, &value)? {
                rewritten.push_attribute((key.as_str(), data.as_str()));
                continue;
            }
        }
        rewritten.push_attribute((key.as_str(), value.as_ref()));
    }
    Ok(rewritten)
}
