//! Plain terminal renderer for the feed.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use tk_core::CategoryTone;
use tk_feed::FeedView;

fn tone_color(tone: CategoryTone) -> Color {
    match tone {
        CategoryTone::Emerald => Color::DarkGreen,
        CategoryTone::Orange => Color::DarkYellow,
        CategoryTone::Blue => Color::Blue,
        CategoryTone::Purple => Color::Magenta,
        CategoryTone::Cyan => Color::Cyan,
        CategoryTone::Gray => Color::Grey,
    }
}

fn styled<W: Write>(out: &mut W, color: Color, text: &str) -> io::Result<()> {
    queue!(out, SetForegroundColor(color), Print(text), ResetColor)
}

pub fn clear<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))
}

pub fn render_feed<W: Write>(out: &mut W, view: &FeedView) -> io::Result<()> {
    if view.show_ticker() {
        styled(out, Color::Red, &view.ticker.join("  •  "))?;
        queue!(out, Print("\r\n\r\n"))?;
    }

    let tabs: Vec<String> = view
        .categories
        .iter()
        .map(|c| if c.active { format!("[{}]", c.label) } else { c.label.to_string() })
        .collect();
    queue!(out, Print(tabs.join(" | ")), Print("\r\n\r\n"))?;

    queue!(
        out,
        SetAttribute(Attribute::Bold),
        Print(&view.heading),
        SetAttribute(Attribute::Reset),
        Print("  ")
    )?;
    styled(out, Color::DarkGrey, &view.status)?;
    if view.loading {
        styled(out, Color::DarkGrey, "  (refreshing)")?;
    }
    queue!(out, Print("\r\n\r\n"))?;

    if let Some(error) = &view.error {
        styled(out, Color::Red, &format!("! {} (type r to try again)", error))?;
        queue!(out, Print("\r\n\r\n"))?;
    }

    if view.show_skeleton {
        styled(out, Color::DarkGrey, "Loading stories...")?;
        queue!(out, Print("\r\n"))?;
    }

    for card in &view.articles {
        styled(out, tone_color(card.tone), &format!("{:<14}", card.category.to_uppercase()))?;
        if card.is_breaking {
            styled(out, Color::Red, "● LIVE ")?;
        }
        queue!(
            out,
            SetAttribute(Attribute::Bold),
            Print(&card.headline),
            SetAttribute(Attribute::Reset),
            Print("\r\n"),
            Print(format!("              {}\r\n", card.summary))
        )?;
        if !card.source.is_empty() {
            styled(out, Color::DarkGrey, &format!("              via {}\r\n", card.source))?;
        }
        queue!(out, Print("\r\n"))?;
    }

    if !view.citations.is_empty() {
        queue!(out, SetAttribute(Attribute::Bold), Print("Verified Sources & Grounding"), SetAttribute(Attribute::Reset), Print("\r\n"))?;
        for link in &view.citations {
            queue!(out, Print(format!("  {} <{}>\r\n", link.label, link.uri)))?;
        }
    }

    out.flush()
}
