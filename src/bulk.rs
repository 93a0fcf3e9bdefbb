use std::io::Read;

use crate::answer::AnswerSet;
use crate::assessment::AssessmentType;
use crate::error::{Error, Result};

/// 一括回答CSVを読み込む
///
/// 1行目は見出し行。1列目は回答者ID、2列目以降が設問順の回答値。
/// 空欄は未回答として扱い、採点時に [`Error::IncompleteAnswers`] になる。
/// 不正な行はその行だけがエラーになり、後続の行は読み続ける。
pub fn read_bulk<R: Read>(
    reader: R,
    assessment: AssessmentType,
) -> impl Iterator<Item = Result<(String, AnswerSet)>> {
    let question_count = assessment.question_count();
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
        .into_records()
        .map(move |record| parse_row(&record?, question_count))
}

fn parse_row(record: &csv::StringRecord, question_count: usize) -> Result<(String, AnswerSet)> {
    let line = record.position().map(|position| position.line()).unwrap_or(0);
    let mut cells = record.iter();
    let id = cells.next().unwrap_or_default().to_string();

    let answered = record.len().saturating_sub(1);
    if answered > question_count {
        return Err(Error::UnknownQuestion {
            index: question_count,
            count: question_count,
        });
    }
    if answered < question_count {
        return Err(Error::IncompleteAnswers {
            missing: answered,
            answered,
            expected: question_count,
        });
    }

    let mut answers = AnswerSet::new();
    for (index, cell) in cells.enumerate() {
        if cell.is_empty() {
            continue;
        }
        let value = cell.parse::<i64>().map_err(|_| Error::InvalidRecord {
            line,
            message: format!("answer {} of `{id}` is not an integer: `{cell}`", index + 1),
        })?;
        let value = u8::try_from(value).map_err(|_| Error::InvalidAnswerValue { index, value })?;
        answers.insert(index, value);
    }
    Ok((id, answers))
}
