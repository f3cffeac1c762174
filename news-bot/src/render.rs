//! Rendering of catalog pages, item details, weather, quotes and the daily digest into
//! transport-agnostic [`OutgoingMessage`]s.

use dbot_core::{InlineButton, OutgoingMessage, ReplyMarkup, TextFormat};
use news_providers::{Quote, WeatherReport};

use crate::catalog::{NewsItem, NewsPage, PageResult};
use crate::countries::CountrySelection;
use crate::token::CallbackToken;

pub const START_BUTTON: &str = "🆕 Start";
pub const NEWS_BUTTON: &str = "News";
pub const WEATHER_BUTTON: &str = "Weather";
pub const QUOTE_BUTTON: &str = "Quote";

pub const WELCOME_TEXT: &str = "Welcome! Click the button below to get started:";
pub const PICK_COUNTRY_TEXT: &str = "Please choose a country to get news from:";
pub const NO_NEWS_TEXT: &str = "❌ No news available.";
pub const LATEST_NEWS_TEXT: &str = "📰 Latest News:";
pub const NO_MORE_NEWS_TEXT: &str = "📭 No more news.";
pub const MORE_NEWS_LABEL: &str = "➡ More News";
pub const NOT_FOUND_TEXT: &str = "❌ News item not found.";
pub const WEATHER_UNAVAILABLE_TEXT: &str = "❌ Weather is unavailable right now.";
pub const QUOTE_UNAVAILABLE_TEXT: &str = "❌ Quote is unavailable right now.";
pub const GOOD_MORNING_TEXT: &str = "☀️ Good morning! Here is your daily digest.";

/// Telegram's photo caption limit, in characters.
pub const CAPTION_LIMIT: usize = 1024;

const TITLE_BUDGET: usize = 300;
const ELLIPSIS: char = '…';
const READ_MORE: &str = "🔗 Read More";

/// Welcome text with the persistent reply keyboard.
pub fn welcome() -> OutgoingMessage {
    OutgoingMessage::text(WELCOME_TEXT).with_markup(ReplyMarkup::Keyboard(vec![
        vec![START_BUTTON.to_string()],
        vec![NEWS_BUTTON.to_string(), WEATHER_BUTTON.to_string()],
        vec![QUOTE_BUTTON.to_string()],
    ]))
}

/// One inline button per country, in table order.
pub fn country_picker() -> OutgoingMessage {
    let rows = CountrySelection::all()
        .map(|c| {
            vec![InlineButton::new(
                c.name,
                CallbackToken::Country(c.name.to_string()).encode(),
            )]
        })
        .collect();
    OutgoingMessage::text(PICK_COUNTRY_TEXT).with_markup(ReplyMarkup::Inline(rows))
}

pub fn no_news() -> OutgoingMessage {
    OutgoingMessage::text(NO_NEWS_TEXT)
}

pub fn not_found() -> OutgoingMessage {
    OutgoingMessage::text(NOT_FOUND_TEXT)
}

/// `NoNews` and pages past the end get distinct texts; otherwise a header with one button per item.
pub fn render_page(result: &PageResult) -> OutgoingMessage {
    match result {
        PageResult::NoNews => no_news(),
        PageResult::Page(page) if page.items.is_empty() => OutgoingMessage::text(NO_MORE_NEWS_TEXT),
        PageResult::Page(page) => {
            OutgoingMessage::text(LATEST_NEWS_TEXT).with_markup(ReplyMarkup::Inline(page_keyboard(page)))
        }
    }
}

/// Item buttons plus `➡ More News` when the page has a successor.
pub fn page_keyboard(page: &NewsPage) -> Vec<Vec<InlineButton>> {
    let mut rows: Vec<Vec<InlineButton>> = page
        .items
        .iter()
        .map(|item| {
            vec![InlineButton::new(
                button_label(item),
                CallbackToken::NewsDetail(item.id).encode(),
            )]
        })
        .collect();

    if page.has_more {
        rows.push(vec![InlineButton::new(
            MORE_NEWS_LABEL,
            CallbackToken::More(page.next_offset()).encode(),
        )]);
    }
    rows
}

// Telegram rejects buttons with empty text.
fn button_label(item: &NewsItem) -> String {
    let title = item.title.trim();
    if title.is_empty() {
        format!("News #{}", item.id)
    } else {
        title.to_string()
    }
}

/// Photo with HTML caption, or an HTML text message when the item has no image.
pub fn render_detail(item: &NewsItem) -> OutgoingMessage {
    let caption = detail_caption(item);
    if item.has_image() {
        OutgoingMessage::Photo {
            url: item.image_url.trim().to_string(),
            caption,
            format: TextFormat::Html,
        }
    } else {
        OutgoingMessage::html(caption)
    }
}

/// Bold title, description and a "Read More" link. Telegram limits the caption's parsed text
/// (tags and the href not counted, entities as one character) to [`CAPTION_LIMIT`]; the
/// description is shortened first.
pub fn detail_caption(item: &NewsItem) -> String {
    let title = truncate(&item.title, TITLE_BUDGET);
    let has_link = !item.url.trim().is_empty();
    let separator = "\n\n";

    let mut visible = title.chars().count() + separator.chars().count();
    if has_link {
        visible += separator.chars().count() + READ_MORE.chars().count();
    }
    let description = truncate(&item.description, CAPTION_LIMIT.saturating_sub(visible));

    let mut caption = format!("<b>{}</b>", escape_html(&title));
    if !description.is_empty() {
        caption.push_str(separator);
        caption.push_str(&escape_html(&description));
    }
    if has_link {
        caption.push_str(&format!(
            "{}🔗 <a href=\"{}\">Read More</a>",
            separator,
            escape_html(item.url.trim())
        ));
    }
    caption
}

pub fn render_weather(report: &WeatherReport) -> OutgoingMessage {
    OutgoingMessage::html(weather_section(report))
}

pub fn weather_unavailable() -> OutgoingMessage {
    OutgoingMessage::text(WEATHER_UNAVAILABLE_TEXT)
}

pub fn render_quote(quote: &Quote) -> OutgoingMessage {
    OutgoingMessage::html(quote_section(quote))
}

pub fn quote_unavailable() -> OutgoingMessage {
    OutgoingMessage::text(QUOTE_UNAVAILABLE_TEXT)
}

fn weather_section(report: &WeatherReport) -> String {
    format!(
        "🌤 <b>Weather in {}</b>\n{}, {:.1}°C (min {:.1}°C, max {:.1}°C)\n💧 Humidity: {}%\n💨 Wind: {:.1} m/s",
        escape_html(&report.city),
        escape_html(&report.description),
        report.temp,
        report.temp_min,
        report.temp_max,
        report.humidity,
        report.wind_speed,
    )
}

fn quote_section(quote: &Quote) -> String {
    format!(
        "💬 <i>“{}”</i>\n— {}",
        escape_html(&quote.text),
        escape_html(&quote.author)
    )
}

/// Daily digest: greeting, then whichever sections are available, with the first news page as
/// the inline keyboard. `None` when there is nothing to say.
pub fn compose_daily(
    weather: Option<&WeatherReport>,
    quote: Option<&Quote>,
    page: &PageResult,
) -> Option<OutgoingMessage> {
    let news = match page {
        PageResult::Page(page) if !page.items.is_empty() => Some(page),
        _ => None,
    };

    if weather.is_none() && quote.is_none() && news.is_none() {
        return None;
    }

    let mut sections = vec![GOOD_MORNING_TEXT.to_string()];
    if let Some(report) = weather {
        sections.push(weather_section(report));
    }
    if let Some(quote) = quote {
        sections.push(quote_section(quote));
    }
    if news.is_some() {
        sections.push(LATEST_NEWS_TEXT.to_string());
    }

    let message = OutgoingMessage::html(sections.join("\n\n"));
    Some(match news {
        Some(page) => message.with_markup(ReplyMarkup::Inline(page_keyboard(page))),
        None => message,
    })
}

/// Escapes the characters Telegram's HTML parse mode treats specially.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

/// Trims `text` and cuts it to at most `budget` chars, ellipsis included.
fn truncate(text: &str, budget: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= budget {
        return text.to_string();
    }
    if budget == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(budget - 1).collect();
    out.push(ELLIPSIS);
    out
}
