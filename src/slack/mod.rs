pub mod slash_command;

use chrono::{DateTime, TimeZone};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Contains the ID and domain of a Slack team.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Team {
    pub id: String,
    pub domain: String,
}

/// Contains the ID and name of a Slack enterprise.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Enterprise {
    pub id: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Channel {
    pub id: String,
    pub name: String,
}

impl Channel {
    /// Parses an inline channel entity such as `<@C024BE7LR|general>`.
    pub fn parse(entity: &str) -> Channel {
        let (id, name) = parse_entity(entity);
        Channel {
            id: id.to_owned(),
            name: name.to_owned(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
}

impl User {
    /// Parses an inline user entity: `<@U123|bob>`, `<@U123>`, `@bob` or `bob`.
    pub fn parse(entity: &str) -> User {
        let (id, name) = parse_entity(entity);
        User {
            id: id.to_owned(),
            name: name.to_owned(),
        }
    }
}

/// Splits an entity token into `(id, name)`.
///
/// Only a complete `<@...>` token of at least six bytes is treated as a
/// reference. Anything else, including an unterminated `<@123|foo`, is a
/// plain name.
fn parse_entity(e: &str) -> (&str, &str) {
    if e.is_empty() {
        return ("", "");
    }

    if e.len() >= 6 && e.starts_with("<@") && e.ends_with('>') {
        let inner = &e[2..e.len() - 1];
        return match inner.find('|') {
            Some(i) => (&inner[..i], &inner[i + 1..]),
            None => (inner, ""),
        };
    }

    ("", e.strip_prefix('@').unwrap_or(e))
}

/// Reply to a slash command.
///
/// A default `Response` serializes to `{}`. Handlers that want no reply at
/// all return `None` instead.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_type: Option<ResponseType>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl Response {
    pub fn text<S: Into<String>>(text: S) -> Response {
        Response {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn ephemeral<S: Into<String>>(text: S) -> Response {
        Response {
            response_type: Some(ResponseType::Ephemeral),
            ..Response::text(text)
        }
    }

    pub fn in_channel<S: Into<String>>(text: S) -> Response {
        Response {
            response_type: Some(ResponseType::InChannel),
            ..Response::text(text)
        }
    }
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseType {
    #[serde(rename = "in_channel")] InChannel,
    #[serde(rename = "ephemeral")] Ephemeral,
}

/// Small section at the top of an attachment. `link` and `icon` only render
/// when `name` is set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub link: String,
    pub icon: String,
}

/// Larger, bold text near the top of an attachment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Title {
    pub title: String,
    pub link: String,
}

/// Displayed in a table alongside the other fields of an attachment.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Field {
    /// Bold heading above the value. Cannot contain markup.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    /// May contain message markup and span several lines.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
    /// Whether the value is short enough to sit next to other fields.
    pub short: bool,
}

impl Field {
    pub fn new<T: Into<String>, V: Into<String>>(title: T, value: V, short: bool) -> Field {
        Field {
            title: title.into(),
            value: value.into(),
            short,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attachment {
    /// Plain-text summary for clients that can't render attachments.
    pub fallback: String,
    /// `good`, `warning`, `danger` or a hex code like `#439FE0`.
    pub color: String,
    pub pretext: String,
    pub text: String,
    pub author: Option<Author>,
    pub title: Option<Title>,
    pub fields: Vec<Field>,
    pub image_url: String,
    pub thumb_url: String,
    /// Limited to 300 characters by Slack.
    pub footer: String,
    /// Ignored unless `footer` is set.
    pub footer_icon: String,
    /// Seconds since the epoch, shown in the footer.
    pub timestamp: Option<i64>,
}

impl Attachment {
    pub fn new<S: Into<String>>(fallback: S) -> Attachment {
        Attachment {
            fallback: fallback.into(),
            ..Default::default()
        }
    }

    pub fn set_timestamp<Tz: TimeZone>(&mut self, time: &DateTime<Tz>) {
        self.timestamp = Some(time.timestamp());
    }
}

impl Serialize for Attachment {
    fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("fallback", &self.fallback)?;
        non_empty_entry(&mut map, "color", &self.color)?;
        non_empty_entry(&mut map, "pretext", &self.pretext)?;
        non_empty_entry(&mut map, "text", &self.text)?;
        if let Some(ref author) = self.author {
            non_empty_entry(&mut map, "author_name", &author.name)?;
            non_empty_entry(&mut map, "author_link", &author.link)?;
            non_empty_entry(&mut map, "author_icon", &author.icon)?;
        }
        if let Some(ref title) = self.title {
            non_empty_entry(&mut map, "title", &title.title)?;
            non_empty_entry(&mut map, "title_link", &title.link)?;
        }
        if !self.fields.is_empty() {
            map.serialize_entry("fields", &self.fields)?;
        }
        non_empty_entry(&mut map, "image_url", &self.image_url)?;
        non_empty_entry(&mut map, "thumb_url", &self.thumb_url)?;
        non_empty_entry(&mut map, "footer", &self.footer)?;
        non_empty_entry(&mut map, "footer_icon", &self.footer_icon)?;
        if let Some(ts) = self.timestamp {
            map.serialize_entry("ts", &ts)?;
        }
        map.end()
    }
}

fn non_empty_entry<M>(map: &mut M, key: &'static str, value: &str) -> ::std::result::Result<(), M::Error>
where
    M: SerializeMap,
{
    if value.is_empty() {
        return Ok(());
    }
    map.serialize_entry(key, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn parse_entity_cases() {
        let cases = [
            ("", "", ""),
            ("foo", "", "foo"),
            ("@foo", "", "foo"),
            ("<@1|a>", "1", "a"),
            ("<@123|foo>", "123", "foo"),
            ("<@123>", "123", ""),
            ("<@123|foo", "", "<@123|foo"),
            ("<@12>", "", "<@12>"),
        ];
        for &(entity, id, name) in cases.iter() {
            assert_eq!(parse_entity(entity), (id, name), "entity {:?}", entity);
        }
    }

    #[test]
    fn plain_names_pass_through() {
        for name in ["bob", "general", "a|b", "x>"].iter() {
            assert_eq!(parse_entity(name), ("", *name));
        }
    }

    #[test]
    fn parse_user_and_channel() {
        assert_eq!(
            User::parse("<@U024BE7LH|bob>"),
            User {
                id: "U024BE7LH".to_owned(),
                name: "bob".to_owned(),
            }
        );
        assert_eq!(
            Channel::parse("@general"),
            Channel {
                id: "".to_owned(),
                name: "general".to_owned(),
            }
        );
    }

    #[test]
    fn empty_response_is_empty_object() {
        let value = serde_json::to_value(&Response::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn response_type_is_emitted_when_set() {
        let value = serde_json::to_value(&Response::ephemeral("pong")).unwrap();
        assert_eq!(value, json!({ "response_type": "ephemeral", "text": "pong" }));

        let value = serde_json::to_value(&Response::in_channel("hello all")).unwrap();
        assert_eq!(value, json!({ "response_type": "in_channel", "text": "hello all" }));
    }

    #[test]
    fn field_always_has_short() {
        let value = serde_json::to_value(&Field::default()).unwrap();
        assert_eq!(value, json!({ "short": false }));

        let value = serde_json::to_value(&Field::new("Status", "ok", true)).unwrap();
        assert_eq!(value, json!({ "title": "Status", "value": "ok", "short": true }));
    }

    #[test]
    fn attachment_without_author_or_title() {
        let value = serde_json::to_value(&Attachment::new("summary")).unwrap();
        assert_eq!(value, json!({ "fallback": "summary" }));
    }

    #[test]
    fn attachment_flattens_author_and_title() {
        let attachment = Attachment {
            author: Some(Author {
                name: "bob".to_owned(),
                link: "".to_owned(),
                icon: "https://example.com/bob.png".to_owned(),
            }),
            title: Some(Title {
                title: "Report".to_owned(),
                link: "https://example.com/report".to_owned(),
            }),
            ..Attachment::new("summary")
        };
        let value = serde_json::to_value(&attachment).unwrap();
        assert_eq!(
            value,
            json!({
                "fallback": "summary",
                "author_name": "bob",
                "author_icon": "https://example.com/bob.png",
                "title": "Report",
                "title_link": "https://example.com/report",
            })
        );
    }

    #[test]
    fn empty_author_emits_nothing() {
        let attachment = Attachment {
            author: Some(Author::default()),
            ..Attachment::new("")
        };
        let value = serde_json::to_value(&attachment).unwrap();
        assert_eq!(value, json!({ "fallback": "" }));
    }

    #[test]
    fn full_attachment() {
        let mut attachment = Attachment {
            color: "#439FE0".to_owned(),
            pretext: "pre".to_owned(),
            text: "body".to_owned(),
            fields: vec![Field::new("a", "1", true), Field::new("", "", false)],
            image_url: "https://example.com/i.png".to_owned(),
            thumb_url: "https://example.com/t.png".to_owned(),
            footer: "foot".to_owned(),
            footer_icon: "https://example.com/f.png".to_owned(),
            ..Attachment::new("summary")
        };
        attachment.set_timestamp(&Utc.timestamp_opt(1_500_000_000, 0).unwrap());

        let response = Response {
            text: "hi".to_owned(),
            attachments: vec![attachment],
            ..Default::default()
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "text": "hi",
                "attachments": [{
                    "fallback": "summary",
                    "color": "#439FE0",
                    "pretext": "pre",
                    "text": "body",
                    "fields": [
                        { "title": "a", "value": "1", "short": true },
                        { "short": false },
                    ],
                    "image_url": "https://example.com/i.png",
                    "thumb_url": "https://example.com/t.png",
                    "footer": "foot",
                    "footer_icon": "https://example.com/f.png",
                    "ts": 1_500_000_000,
                }],
            })
        );
    }
}
