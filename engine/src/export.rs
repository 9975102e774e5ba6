//! Saving the result receipt as an image.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use thiserror::Error;

use soulbar_types::{Artifact, HexColor};

/// Background painted behind exported receipts.
pub const RECEIPT_BACKGROUND: HexColor = HexColor::from_rgb(0x1c, 0x19, 0x17);

const CARD_WIDTH: u32 = 420;
const LINE_HEIGHT: u32 = 22;
const WRAP_COLUMNS: usize = 42;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("there is no receipt on screen to save")]
    RegionNotFound,
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The printable receipt for one drink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptCard {
    pub name: String,
    pub timestamp: String,
    pub ingredients: Vec<String>,
    pub analysis: String,
    pub mood: String,
    pub mode: &'static str,
    pub positivity: u8,
    pub color: HexColor,
}

impl ReceiptCard {
    pub const TITLE: &'static str = "Mood Prescription Receipt";

    #[must_use]
    pub fn from_artifact(artifact: &Artifact) -> Self {
        let created: DateTime<Local> = artifact.created_at().into();
        Self {
            name: artifact.name().to_string(),
            timestamp: created.format("%b %-d, %Y  %-I:%M %p").to_string(),
            ingredients: artifact
                .ingredients()
                .iter()
                .map(|i| i.as_str().to_string())
                .collect(),
            analysis: artifact.description().to_string(),
            mood: artifact.origin_mood().to_string(),
            mode: artifact.mode().label(),
            positivity: artifact.positivity().value(),
            color: artifact.color(),
        }
    }

    /// `SoulBar-<name>` with anything unsafe for a filename replaced.
    #[must_use]
    pub fn file_stem(&self) -> String {
        let cleaned: String = self
            .name
            .trim()
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        let cleaned = cleaned.trim_matches('-');
        if cleaned.is_empty() {
            "SoulBar-drink".to_string()
        } else {
            format!("SoulBar-{cleaned}")
        }
    }
}

/// Turns a receipt into an image file.
pub trait ReceiptExporter: Send {
    fn export(&self, card: &ReceiptCard, background: HexColor) -> Result<PathBuf, ExportError>;
}

/// Writes receipts as standalone SVG documents.
#[derive(Debug, Clone)]
pub struct SvgReceiptExporter {
    dir: PathBuf,
}

impl SvgReceiptExporter {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ReceiptExporter for SvgReceiptExporter {
    fn export(&self, card: &ReceiptCard, background: HexColor) -> Result<PathBuf, ExportError> {
        let path = self.dir.join(format!("{}.svg", card.file_stem()));
        let io_err = |source| ExportError::Io {
            path: path.clone(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_err)?;
        fs::write(&path, render_svg(card, background)).map_err(io_err)?;
        tracing::info!(path = %path.display(), "Saved receipt");
        Ok(path)
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > columns {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Renders the receipt region as an SVG document.
#[must_use]
pub fn render_svg(card: &ReceiptCard, background: HexColor) -> String {
    let analysis = wrap(&card.analysis, WRAP_COLUMNS);
    let rows = 7 + card.ingredients.len() + analysis.len();
    let height = 40 + LINE_HEIGHT * rows as u32;

    let mut body = String::new();
    let mut y = 40;
    let text = |body: &mut String, y: &mut u32, size: u32, fill: &str, content: &str| {
        let _ = writeln!(
            body,
            r#"  <text x="24" y="{y}" font-size="{size}" fill="{fill}">{}</text>"#,
            escape_xml(content)
        );
        *y += LINE_HEIGHT;
    };

    text(&mut body, &mut y, 12, "#a8a29e", ReceiptCard::TITLE);
    text(&mut body, &mut y, 20, "#c5a059", &card.name);
    text(&mut body, &mut y, 11, "#a8a29e", &card.timestamp);
    y += LINE_HEIGHT / 2;
    for ingredient in &card.ingredients {
        text(&mut body, &mut y, 13, "#e7e5e4", &format!("• {ingredient}"));
    }
    y += LINE_HEIGHT / 2;
    for line in &analysis {
        text(&mut body, &mut y, 12, "#d6d3d1", line);
    }
    text(
        &mut body,
        &mut y,
        12,
        "#a8a29e",
        &format!("Mood: {}  ({})", card.mood, card.mode),
    );
    text(
        &mut body,
        &mut y,
        14,
        "#c5a059",
        &format!("Positivity: {}%", card.positivity),
    );

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{CARD_WIDTH}" height="{height}" viewBox="0 0 {CARD_WIDTH} {height}" font-family="Georgia, serif">
  <rect width="100%" height="100%" fill="{background}"/>
  <circle cx="{cx}" cy="36" r="14" fill="{swatch}"/>
{body}</svg>
"#,
        cx = CARD_WIDTH - 40,
        swatch = card.color,
    )
}
