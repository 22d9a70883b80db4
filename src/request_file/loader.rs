//! Request files for batch mode.
//!
//! One record per line, space separated: `<step> <floor>` or
//! `<step> <boarding floor> <target floor>`. Blank lines and lines starting
//! with `#` are skipped.
use std::fs;
use std::path::Path;

use crate::error::{ElevatorError, ElevatorResult};
use crate::local_elevator::fsm::floor_request::{Floor, FloorRequest, Step};

pub fn load(path: impl AsRef<Path>) -> ElevatorResult<Vec<FloorRequest>> {
    let raw = fs::read_to_string(path)?;
    parse(&raw)
}

pub fn parse(raw: &str) -> ElevatorResult<Vec<FloorRequest>> {
    let mut requests = Vec::new();
    for (index, line) in raw.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        requests.push(parse_record(index + 1, trimmed)?);
    }
    Ok(requests)
}

fn parse_record(line_no: usize, line: &str) -> ElevatorResult<FloorRequest> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let bad = |reason: String| ElevatorError::MalformedRecord {
        line_no,
        line: line.to_string(),
        reason,
    };
    let floor = |raw: &str| raw.parse::<Floor>().map_err(|e| bad(format!("floor {:?}: {}", raw, e)));

    match fields[..] {
        [step, target] => {
            let step = parse_step(step).map_err(&bad)?;
            Ok(FloorRequest::new(step, floor(target)?))
        }
        [step, boarding, target] => {
            let step = parse_step(step).map_err(&bad)?;
            Ok(FloorRequest::with_boarding(step, floor(boarding)?, floor(target)?))
        }
        _ => Err(bad(format!("expected 2 or 3 fields, got {}", fields.len()))),
    }
}

fn parse_step(raw: &str) -> Result<Step, String> {
    raw.parse::<Step>().map_err(|e| format!("step {:?}: {}", raw, e))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_parses_both_record_shapes() {
        let requests = parse("1 5\n3 2 9\n").unwrap();
        assert_eq!(
            requests,
            vec![FloorRequest::new(1, 5), FloorRequest::with_boarding(3, 2, 9)]
        );
    }

    #[test]
    fn it_skips_blank_and_comment_lines() {
        let requests = parse("# step floor\n\n  4 7  \n").unwrap();
        assert_eq!(requests, vec![FloorRequest::new(4, 7)]);
    }

    #[test]
    fn it_reports_line_number_of_bad_record() {
        let err = parse("1 5\n2 x\n").unwrap_err();
        assert!(matches!(err, ElevatorError::MalformedRecord { line_no: 2, .. }));
    }

    #[test]
    fn it_rejects_wrong_field_count_and_negative_step() {
        assert!(parse("1 2 3 4").is_err());
        assert!(parse("7").is_err());
        assert!(parse("-1 3").is_err());
    }
}
