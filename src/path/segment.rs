use std::fmt;

/// One step of a flat key: an object property name or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(name) => write!(f, "{name}"),
            Segment::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// Split a flat key into segments.
///
/// `.` separates property names and `[N]` marks an array index, so
/// `a.b[2].c` becomes `Key(a), Key(b), Index(2), Key(c)`. Empty runs
/// between separators are dropped, which is why `a..b` and `a.b` parse
/// alike. Any dot-delimited token made only of digits is also read as an
/// index; object property names that are purely numeric therefore cannot
/// be addressed and are out of scope. Digit runs that do not fit below
/// `usize::MAX` stay literal key text.
///
/// A `[` that does not open a well-formed `[digits]` group is ordinary key
/// text: `a[x]` is the single key `a[x]`.
pub fn parse_segments(key: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut buf = String::new();
    let mut chars = key.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '.' => flush(&mut buf, &mut segments),
            '[' => {
                let mut digits = String::new();
                let mut lookahead = chars.clone();
                while let Some(next) = lookahead.peek() {
                    if next.is_ascii_digit() {
                        digits.push(*next);
                        lookahead.next();
                    } else {
                        break;
                    }
                }
                if !digits.is_empty() && lookahead.peek() == Some(&']') {
                    lookahead.next();
                    flush(&mut buf, &mut segments);
                    push_numeric(digits, &mut segments);
                    chars = lookahead;
                } else {
                    buf.push('[');
                }
            }
            _ => buf.push(ch),
        }
    }
    flush(&mut buf, &mut segments);
    segments
}

fn flush(buf: &mut String, segments: &mut Vec<Segment>) {
    if buf.is_empty() {
        return;
    }
    let token = std::mem::take(buf);
    if token.bytes().all(|byte| byte.is_ascii_digit()) {
        push_numeric(token, segments);
    } else {
        segments.push(Segment::Key(token));
    }
}

fn push_numeric(digits: String, segments: &mut Vec<Segment>) {
    // Runs that overflow usize stay literal keys, and so does usize::MAX
    // itself: planting a value needs room for index + 1 elements.
    match digits.parse::<usize>() {
        Ok(index) if index < usize::MAX => segments.push(Segment::Index(index)),
        _ => segments.push(Segment::Key(digits)),
    }
}

/// Append a property name to a parent path: `a` + `b` is `a.b`, and a name
/// under the empty root path stays bare.
pub fn join_key(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

/// Append an array index to a parent path: `a` + 2 is `a[2]`.
pub fn index_key(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}
