use std::fmt::Write;

use serde::Serialize;

use crate::input::reader::read_bytes;
use crate::pipeline::stage1_extract::Mapping;
use crate::render::{MapRenderer, RenderError, RenderOptions, RenderRequest, ScrollBehavior};

/// Builder options in the names the Escher library expects.
#[derive(Debug, Serialize)]
struct BuilderOptions<'a> {
    reaction_data: &'a Mapping,
    reaction_scale_preset: &'a str,
    scroll_behavior: ScrollBehavior,
    never_ask_before_quit: bool,
}

/// Emits an HTML page that loads Escher and builds the map in the browser.
///
/// The map file is embedded verbatim as a string and only parsed client side.
/// Output contains no timestamps, so identical inputs give identical bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct EscherHtmlRenderer;

impl MapRenderer for EscherHtmlRenderer {
    fn render(
        &self,
        request: &RenderRequest<'_>,
        options: &RenderOptions,
    ) -> Result<String, RenderError> {
        let bytes = read_bytes(&request.asset.path)?;
        let map_text = String::from_utf8(bytes)
            .map_err(|_| RenderError::NotText(request.asset.file_name.clone()))?;

        let builder_options = BuilderOptions {
            reaction_data: request.overlay,
            reaction_scale_preset: &options.reaction_scale_preset,
            scroll_behavior: options.scroll_behavior,
            never_ask_before_quit: options.never_ask_before_quit,
        };

        let map_literal = script_safe(&serde_json::to_string(&map_text)?);
        let options_literal = script_safe(&serde_json::to_string(&builder_options)?);
        let title = format!("{} | {}", request.column, request.asset.file_name);

        let mut html = String::with_capacity(map_text.len() + 4096);
        writeln!(html, "<!DOCTYPE html>")?;
        writeln!(html, "<html lang=\"en\">")?;
        writeln!(html, "<head>")?;
        writeln!(html, "<meta charset=\"utf-8\"/>")?;
        writeln!(
            html,
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"/>"
        )?;
        writeln!(html, "<title>{}</title>", escape_html(&title))?;
        writeln!(
            html,
            "<script src=\"{}\"></script>",
            escape_html(&options.escher_url)
        )?;
        writeln!(html, "<style>")?;
        writeln!(html, "html,body{{margin:0;padding:0;height:100%;}}")?;
        writeln!(html, "#map-container{{width:100%;height:100%;}}")?;
        writeln!(html, "</style>")?;
        writeln!(html, "</head>")?;
        writeln!(html, "<body>")?;
        writeln!(html, "<div id=\"map-container\"></div>")?;
        writeln!(html, "<script>")?;
        writeln!(html, "var mapData = JSON.parse({});", map_literal)?;
        writeln!(html, "var options = {};", options_literal)?;
        writeln!(
            html,
            "escher.Builder(mapData, null, null, escher.libs.d3_select('#map-container'), options);"
        )?;
        writeln!(html, "</script>")?;
        writeln!(html, "</body>")?;
        writeln!(html, "</html>")?;

        Ok(html)
    }
}

/// In serde_json output `<` can only appear inside strings, where `\u003c`
/// is equivalent and cannot open `</script>` or `<!--`.
fn script_safe(json: &str) -> String {
    json.replace('<', "\\u003c")
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/render/escher.rs"]
mod tests;
