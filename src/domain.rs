use std::str::FromStr;

use compact_str::{CompactString, format_compact};
use serde_json::Value;

use crate::result::{BotError, Result};

/// Review outcome reported by the homework API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Approved,
    Reviewing,
    Rejected,
}

impl Verdict {
    /// Fixed sentence sent to the user for this verdict
    pub fn sentence(&self) -> &'static str {
        match self {
            Verdict::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Verdict::Reviewing => "Работа взята на проверку ревьюером.",
            Verdict::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl FromStr for Verdict {
    type Err = BotError;

    fn from_str(code: &str) -> Result<Self> {
        match code {
            "approved" => Ok(Verdict::Approved),
            "reviewing" => Ok(Verdict::Reviewing),
            "rejected" => Ok(Verdict::Rejected),
            other => Err(BotError::UnrecognizedStatus(other.into())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkRecord {
    pub name: CompactString,
    pub verdict: Verdict,
}

impl HomeworkRecord {
    /// Message announcing the record's current verdict
    pub fn status_message(&self) -> CompactString {
        format_compact!(
            "Изменился статус проверки работы \"{}\". {}",
            self.name,
            self.verdict.sentence()
        )
    }
}

impl TryFrom<&Value> for HomeworkRecord {
    type Error = BotError;

    fn try_from(homework: &Value) -> Result<Self> {
        let homework = homework
            .as_object()
            .ok_or_else(|| BotError::type_mismatch("записи о работе", "словарь"))?;

        let name = homework
            .get("homework_name")
            .ok_or_else(|| BotError::missing_field("homework_name"))?;
        let status = homework
            .get("status")
            .ok_or_else(|| BotError::missing_field("status"))?;

        let name = name
            .as_str()
            .ok_or_else(|| BotError::type_mismatch("ключе homework_name", "строка"))?;
        let status = status
            .as_str()
            .ok_or_else(|| BotError::type_mismatch("ключе status", "строка"))?;

        Ok(Self { name: name.into(), verdict: status.parse()? })
    }
}

/// Validate the overall shape of an API answer and return its homeworks
pub fn check_response(response: &Value) -> Result<&[Value]> {
    let response = response
        .as_object()
        .ok_or_else(|| BotError::type_mismatch("ответе API", "словарь"))?;

    let homeworks = response
        .get("homeworks")
        .ok_or_else(|| BotError::missing_field("homeworks"))?;
    if !response.contains_key("current_date") {
        return Err(BotError::missing_field("current_date"));
    }

    homeworks
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| BotError::type_mismatch("ключе homeworks", "список"))
}

/// Build the status-change message for a single homework record
pub fn parse_status(homework: &Value) -> Result<CompactString> {
    HomeworkRecord::try_from(homework).map(|record| record.status_message())
}

/// Server timestamp of the answer, when it is a unix time
pub fn current_date(response: &Value) -> Option<i64> {
    response.get("current_date").and_then(Value::as_i64)
}
