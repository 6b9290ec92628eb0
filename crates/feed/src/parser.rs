use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::FeedError;
use crate::models::{Channel, ChannelItem};

/// Parse an RSS channel document from raw XML bytes.
///
/// Returns every `<item>` that carries a `<link>`, in document order.
/// Anything that is not a `<channel>` document is a parse error.
pub fn parse_channel(xml: &[u8]) -> Result<Channel, FeedError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut saw_channel = false;
    let mut in_image = false;
    let mut channel_title: Option<String> = None;
    let mut items = Vec::new();
    let mut buf = Vec::new();

    let mut current_item: Option<ItemBuilder> = None;
    let mut current_element = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                current_element = name.clone();

                match name.as_str() {
                    "channel" => saw_channel = true,
                    "image" => in_image = true,
                    "item" => current_item = Some(ItemBuilder::default()),
                    _ => {}
                }
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();

                match name.as_str() {
                    "image" => in_image = false,
                    "item" => {
                        if let Some(builder) = current_item.take() {
                            if let Some(item) = builder.build() {
                                items.push(item);
                            }
                        }
                    }
                    _ => {}
                }
                current_element.clear();
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().unwrap_or_default().to_string();
                handle_text(
                    &current_element,
                    text,
                    &mut current_item,
                    &mut channel_title,
                    in_image,
                );
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e.into_inner()).to_string();
                handle_text(
                    &current_element,
                    text,
                    &mut current_item,
                    &mut channel_title,
                    in_image,
                );
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(FeedError::Parse(format!("XML parse error: {}", e))),
            _ => {}
        }
        buf.clear();
    }

    if !saw_channel {
        return Err(FeedError::Parse("document has no <channel> element".to_string()));
    }

    Ok(Channel {
        title: channel_title.unwrap_or_default(),
        items,
    })
}

fn handle_text(
    current_element: &str,
    text: String,
    current_item: &mut Option<ItemBuilder>,
    channel_title: &mut Option<String>,
    in_image: bool,
) {
    if text.is_empty() {
        return;
    }

    if let Some(item) = current_item {
        match current_element {
            "title" => item.title = Some(text),
            "link" => item.link = Some(text),
            "description" => item.description = Some(text),
            "pubDate" => item.pub_date = Some(text),
            _ => {}
        }
    } else if current_element == "title" && !in_image && channel_title.is_none() {
        *channel_title = Some(text);
    }
}

#[derive(Default)]
struct ItemBuilder {
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
    pub_date: Option<String>,
}

impl ItemBuilder {
    fn build(self) -> Option<ChannelItem> {
        Some(ChannelItem {
            title: self.title.unwrap_or_default(),
            link: self.link?,
            description: self.description,
            pub_date: self.pub_date.unwrap_or_default(),
        })
    }
}
