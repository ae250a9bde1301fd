//! Renders a resolved record as `name: value` lines.
//!
//! Field names are matched case-insensitively against [`FIELD_TABLE`] and
//! printed with their canonical spelling.

use crate::constants::fields::{DEFAULT_FIELDS, WILDCARD};
use crate::models::anime::AnimeRecord;
use crate::services::lookup::LookupError;

/// Canonical attribute name paired with its accessor.
pub struct FieldSpec {
    pub name: &'static str,
    value: fn(&AnimeRecord) -> String,
}

impl FieldSpec {
    #[must_use]
    pub fn render(&self, record: &AnimeRecord) -> String {
        (self.value)(record)
    }
}

fn optional(value: Option<&String>) -> String {
    value.map_or_else(|| "None".to_string(), Clone::clone)
}

/// Every requestable attribute, in the record's natural order.
pub static FIELD_TABLE: &[FieldSpec] = &[
    FieldSpec {
        name: "id",
        value: |r| r.id.to_string(),
    },
    FieldSpec {
        name: "mediaType",
        value: |r| r.media_type.clone(),
    },
    FieldSpec {
        name: "episodes",
        value: |r| r.episodes.to_string(),
    },
    FieldSpec {
        name: "duration",
        value: |r| r.duration.clone(),
    },
    FieldSpec {
        name: "ongoing",
        value: |r| r.ongoing.clone(),
    },
    FieldSpec {
        name: "start_year",
        value: |r| optional(r.start_year.as_ref()),
    },
    FieldSpec {
        name: "finish_year",
        value: |r| optional(r.finish_year.as_ref()),
    },
    FieldSpec {
        name: "Season_of_Release",
        value: |r| r.season_of_release.clone(),
    },
    FieldSpec {
        name: "description",
        value: |r| r.description.clone(),
    },
    FieldSpec {
        name: "studios",
        value: |r| r.studios.clone(),
    },
    FieldSpec {
        name: "tags",
        value: |r| r.tags.clone(),
    },
    FieldSpec {
        name: "content_warning",
        value: |r| r.content_warning.clone(),
    },
    FieldSpec {
        name: "watched",
        value: |r| r.watched.to_string(),
    },
    FieldSpec {
        name: "watching",
        value: |r| r.watching.to_string(),
    },
    FieldSpec {
        name: "want_to_watch",
        value: |r| r.want_to_watch.to_string(),
    },
    FieldSpec {
        name: "dropped",
        value: |r| r.dropped.to_string(),
    },
    FieldSpec {
        name: "rating",
        value: |r| r.rating.clone(),
    },
    FieldSpec {
        name: "votes",
        value: |r| r.votes.to_string(),
    },
];

/// Case-insensitive lookup in [`FIELD_TABLE`].
#[must_use]
pub fn find_field(name: &str) -> Option<&'static FieldSpec> {
    FIELD_TABLE.iter().find(|f| f.name.eq_ignore_ascii_case(name))
}

/// Requestable names in display order, wildcard last.
pub fn requestable_fields() -> impl Iterator<Item = &'static str> {
    FIELD_TABLE
        .iter()
        .map(|f| f.name)
        .chain(std::iter::once(WILDCARD))
}

enum Selection {
    All,
    Field(&'static FieldSpec),
}

fn push_line(out: &mut String, name: &str, value: &str) {
    out.push_str(name);
    out.push_str(": ");
    out.push_str(value);
    out.push('\n');
}

/// Builds the reply text for `record`.
///
/// The title line always comes first, followed by the requested fields in
/// request order, then any default field the request did not already cover.
/// `all` covers the defaults. An unknown name fails the whole request before
/// anything is rendered.
pub fn project<S: AsRef<str>>(
    record: &AnimeRecord,
    requested: &[S],
) -> Result<String, LookupError> {
    let selections = requested
        .iter()
        .map(|raw| {
            let raw = raw.as_ref();
            if raw.eq_ignore_ascii_case(WILDCARD) {
                Ok(Selection::All)
            } else {
                find_field(raw)
                    .map(Selection::Field)
                    .ok_or_else(|| LookupError::InvalidField(raw.to_string()))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut out = String::new();
    push_line(&mut out, "Title", &record.title);

    let mut pending_defaults: Vec<&str> = DEFAULT_FIELDS.to_vec();

    for selection in &selections {
        match selection {
            Selection::All => {
                for spec in FIELD_TABLE {
                    push_line(&mut out, spec.name, &spec.render(record));
                }
                pending_defaults.clear();
            }
            Selection::Field(spec) => {
                push_line(&mut out, spec.name, &spec.render(record));
                pending_defaults.retain(|name| *name != spec.name);
            }
        }
    }

    for spec in pending_defaults.into_iter().filter_map(find_field) {
        push_line(&mut out, spec.name, &spec.render(record));
    }

    Ok(out)
}

/// Full plain-text view: `ID` line, title, then every other attribute.
#[must_use]
pub fn render_full(record: &AnimeRecord) -> String {
    let mut out = String::new();
    push_line(&mut out, "ID", &record.id.to_string());
    push_line(&mut out, "Title", &record.title);

    for spec in FIELD_TABLE.iter().filter(|f| f.name != "id") {
        push_line(&mut out, spec.name, &spec.render(record));
    }

    out
}
