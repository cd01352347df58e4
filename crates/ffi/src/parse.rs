//! String marshalling for the C boundary.

use allclear_core::{Field, PieceType, FIELD_WIDTH};
use allclear_finder::{HoldState, Operation};

const FIELD_CHARS: usize = 60;

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    BadFieldLength(usize),
    BadPiece(char),
    BadHold(char),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::BadFieldLength(len) => {
                write!(f, "field must be {} chars, got {}", FIELD_CHARS, len)
            }
            ParseError::BadPiece(c) => write!(f, "unknown piece letter: {:?}", c),
            ParseError::BadHold(c) => write!(f, "unknown hold letter: {:?}", c),
        }
    }
}

impl std::error::Error for ParseError {}

/// One char per cell, row-major from the bottom row up; `'_'` is empty.
pub fn parse_field(text: &str) -> Result<Field, ParseError> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() != FIELD_CHARS {
        return Err(ParseError::BadFieldLength(chars.len()));
    }
    let mut field = Field::new();
    for (index, &c) in chars.iter().enumerate() {
        if c != '_' {
            field.set(index % FIELD_WIDTH, index / FIELD_WIDTH);
        }
    }
    Ok(field)
}

pub fn parse_queue(text: &str) -> Result<Vec<PieceType>, ParseError> {
    text.chars()
        .map(|c| PieceType::from_char(c).ok_or(ParseError::BadPiece(c)))
        .collect()
}

/// `'E'` = empty slot, `'X'` = hold disabled, else a piece letter.
pub fn parse_hold(text: &str) -> Result<HoldState, ParseError> {
    match text.chars().next() {
        None | Some('E') => Ok(HoldState::Empty),
        Some('X') => Ok(HoldState::Disabled),
        Some(c) => PieceType::from_char(c)
            .map(HoldState::Piece)
            .ok_or(ParseError::BadHold(c)),
    }
}

/// `piece,x,y,rot|piece,x,y,rot|...` with numeric enum values, or `-1`.
pub fn format_solution(solution: Option<&[Operation]>) -> String {
    match solution {
        None => "-1".to_string(),
        Some(operations) => {
            let mut out = String::new();
            for operation in operations {
                out.push_str(&format!(
                    "{},{},{},{}|",
                    operation.piece as u8, operation.x, operation.y, operation.rotate as u8
                ));
            }
            if out.is_empty() {
                out.push_str("-1");
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use allclear_core::RotateType;

    #[test]
    fn test_parse_field_round_trip() {
        let mut text = String::from("X_________");
        text.push_str(&"_".repeat(50));
        let field = parse_field(&text).expect("valid field string");
        assert!(field.get(0, 0));
        assert_eq!(field.num_of_blocks(), 1);
    }

    #[test]
    fn test_parse_field_wrong_length() {
        assert_eq!(parse_field("___"), Err(ParseError::BadFieldLength(3)));
    }

    #[test]
    fn test_parse_queue() {
        let queue = parse_queue("SZJLTOI").expect("all letters valid");
        assert_eq!(queue.len(), 7);
        assert_eq!(queue[0], PieceType::S);
        assert_eq!(queue[6], PieceType::I);
        assert!(parse_queue("SZQ").is_err());
    }

    #[test]
    fn test_parse_hold() {
        assert_eq!(parse_hold("E"), Ok(HoldState::Empty));
        assert_eq!(parse_hold("X"), Ok(HoldState::Disabled));
        assert_eq!(parse_hold("T"), Ok(HoldState::Piece(PieceType::T)));
        assert!(parse_hold("Q").is_err());
    }

    #[test]
    fn test_format_solution() {
        let operations = vec![
            Operation {
                piece: PieceType::I,
                rotate: RotateType::Left,
                x: 4,
                y: 1,
            },
            Operation {
                piece: PieceType::T,
                rotate: RotateType::Spawn,
                x: 2,
                y: 0,
            },
        ];
        assert_eq!(format_solution(Some(&operations)), "1,4,1,3|0,2,0,0|");
        assert_eq!(format_solution(None), "-1");
        assert_eq!(format_solution(Some(&[])), "-1");
    }
}
