use std::collections::HashMap;

use super::{Channel, Enterprise, Team, User};

/// Flat view of an `application/x-www-form-urlencoded` submission.
///
/// When a key repeats only its first value is kept.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormValues(HashMap<String, String>);

impl FormValues {
    /// Decodes a form body. Malformed pairs are decoded as far as possible
    /// instead of failing: an invalid escape such as `%zz` is kept literally
    /// rather than dropping the pair.
    pub fn parse(body: &[u8]) -> FormValues {
        form_urlencoded::parse(body).into_owned().collect()
    }

    /// Returns the value of `key`, or an empty string if it was not submitted.
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map_or("", String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FormValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> FormValues {
        let mut values: HashMap<String, String> = HashMap::new();
        for (k, v) in iter {
            values.entry(k.into()).or_insert_with(|| v.into());
        }
        FormValues(values)
    }
}

/// A received slash command webhook.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Request {
    pub trigger_id: String,
    /// Verification token. Not checked here, compare it in the handler.
    pub token: String,
    pub team: Team,
    pub enterprise: Enterprise,
    pub channel: Channel,
    pub user: User,
    pub command: String,
    pub text: String,
    pub response_url: String,
}

impl Request {
    /// Builds a `Request` from the known keys of a slash command form.
    ///
    /// The raw `user` value becomes both `user.id` and `user.name`. Use
    /// `User::parse` for mentions inside `text`.
    pub fn from_form(form: &FormValues) -> Request {
        Request {
            trigger_id: form.get("trigger_id").to_owned(),
            token: form.get("token").to_owned(),
            team: Team {
                id: form.get("team_id").to_owned(),
                domain: form.get("team_domain").to_owned(),
            },
            enterprise: Enterprise {
                id: form.get("enterprise_id").to_owned(),
                name: form.get("enterprise_name").to_owned(),
            },
            channel: Channel {
                id: form.get("channel_id").to_owned(),
                name: form.get("channel_name").to_owned(),
            },
            user: User {
                id: form.get("user").to_owned(),
                name: form.get("user").to_owned(),
            },
            command: form.get("command").to_owned(),
            text: form.get("text").to_owned(),
            response_url: form.get("response_url").to_owned(),
        }
    }
}

impl<'a> From<&'a FormValues> for Request {
    fn from(form: &'a FormValues) -> Request {
        Request::from_form(form)
    }
}
