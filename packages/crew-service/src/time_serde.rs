pub mod option;

use serde::{Deserialize, Deserializer, Serializer};
use time::{Date, macros::format_description};

pub fn serialize<S>(value: &Date, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	let formatted = value
		.format(format_description!("[year]-[month]-[day]"))
		.map_err(serde::ser::Error::custom)?;

	serializer.serialize_str(&formatted)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = String::deserialize(deserializer)?;

	parse(&raw).map_err(serde::de::Error::custom)
}

pub(crate) fn parse(raw: &str) -> Result<Date, time::error::Parse> {
	Date::parse(raw, format_description!("[year]-[month]-[day]"))
}
