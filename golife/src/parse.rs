// parse.rs - RLE and plaintext pattern readers

use crate::error::LoadError;
use crate::grid::{Cell, Coord, Population};

const LIFE_RULES: [&str; 3] = ["B3/S23", "S23/B3", "23/3"];

/// Parses run-length encoded pattern text.
///
/// `#` lines are comments. The first other line is the `x = .., y = ..`
/// header, optionally naming the rule. The body ends at `!`. Live cells
/// outside the declared `x` by `y` box make the pattern malformed.
pub fn parse_rle(text: &str) -> Result<Population, LoadError> {
    let mut lines = text.lines().enumerate().map(|(i, line)| (i + 1, line.trim()));

    let (header_line, header) = lines
        .by_ref()
        .find(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .ok_or_else(|| LoadError::malformed(1, "missing header"))?;
    let (width, height) = parse_header(header_line, header)?;

    let mut population = Population::new();
    let (mut x, mut y): (Coord, Coord) = (0, 0);
    let mut run: Option<Coord> = None;

    'body: for (line_no, line) in lines {
        for ch in line.chars() {
            match ch {
                '0'..='9' => {
                    let digit = Coord::from(ch as u8 - b'0');
                    let next = run
                        .unwrap_or(0)
                        .checked_mul(10)
                        .and_then(|n| n.checked_add(digit))
                        .ok_or_else(|| LoadError::malformed(line_no, "run count overflows"))?;
                    run = Some(next);
                }
                'b' | '.' => x = advance(x, run.take(), line_no)?,
                '$' => {
                    y = advance(y, run.take(), line_no)?;
                    x = 0;
                }
                '!' => break 'body,
                c if c.is_ascii_alphabetic() => {
                    let count = checked_run(run.take(), line_no)?;
                    let end = advance(x, Some(count), line_no)?;
                    if y >= height || end > width {
                        return Err(LoadError::malformed(
                            line_no,
                            format!("live cells exceed the declared {width}x{height} box"),
                        ));
                    }
                    for _ in 0..count {
                        population.insert(Cell::new(x, y));
                        x = advance(x, None, line_no)?;
                    }
                }
                c if c.is_whitespace() => {}
                other => {
                    return Err(LoadError::malformed(line_no, format!("unexpected symbol {other:?}")));
                }
            }
        }
    }

    Ok(population)
}

fn checked_run(run: Option<Coord>, line_no: usize) -> Result<Coord, LoadError> {
    match run {
        Some(0) => Err(LoadError::malformed(line_no, "zero-length run")),
        Some(n) => Ok(n),
        None => Ok(1),
    }
}

fn advance(pos: Coord, run: Option<Coord>, line_no: usize) -> Result<Coord, LoadError> {
    pos.checked_add(checked_run(run, line_no)?)
        .ok_or_else(|| LoadError::malformed(line_no, "pattern exceeds coordinate range"))
}

/// Returns the declared `(width, height)`.
fn parse_header(line_no: usize, header: &str) -> Result<(Coord, Coord), LoadError> {
    let mut width = None;
    let mut height = None;

    for field in header.split(',') {
        let (key, value) = field
            .split_once('=')
            .ok_or_else(|| LoadError::malformed(line_no, format!("bad header field {:?}", field.trim())))?;
        let value = value.trim();
        match key.trim() {
            "x" => width = Some(parse_dimension(line_no, value)?),
            "y" => height = Some(parse_dimension(line_no, value)?),
            "rule" => {
                let rule: String = value.chars().filter(|c| !c.is_whitespace()).collect();
                if !LIFE_RULES.iter().any(|r| r.eq_ignore_ascii_case(&rule)) {
                    return Err(LoadError::UnsupportedRule(value.to_string()));
                }
            }
            other => tracing::debug!(key = other, "ignoring unknown RLE header field"),
        }
    }

    match (width, height) {
        (Some(width), Some(height)) => Ok((width, height)),
        _ => Err(LoadError::malformed(line_no, "header needs both x and y")),
    }
}

fn parse_dimension(line_no: usize, value: &str) -> Result<Coord, LoadError> {
    let dimension: Coord = value
        .parse()
        .map_err(|_| LoadError::malformed(line_no, format!("bad dimension {value:?}")))?;
    if dimension < 0 {
        return Err(LoadError::malformed(line_no, format!("negative dimension {value:?}")));
    }
    Ok(dimension)
}

/// Parses plaintext (`.cells`) pattern text: `!` comments, `.` dead,
/// `O`, `o` or `*` alive.
pub fn parse_plaintext(text: &str) -> Result<Population, LoadError> {
    let mut population = Population::new();
    let rows = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.starts_with('!'));

    for (y, (i, line)) in rows.enumerate() {
        for (x, ch) in line.trim_end().chars().enumerate() {
            match ch {
                '.' => {}
                'O' | 'o' | '*' => {
                    population.insert(Cell::new(x as Coord, y as Coord));
                }
                other => {
                    return Err(LoadError::malformed(i + 1, format!("unexpected symbol {other:?}")));
                }
            }
        }
    }

    Ok(population)
}

/// Guesses the format from the text itself: an `x =` header means RLE.
pub fn parse_any(text: &str) -> Result<Population, LoadError> {
    let is_rle = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
        .is_some_and(|line| line.starts_with('x'));

    if is_rle { parse_rle(text) } else { parse_plaintext(text) }
}
