use super::export::ExportState;
use crate::geometry::Point;
use crate::settings::ExportSettings;

/// What, if anything, sits between a value and the text before it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Lead {
    /// First value after a command letter
    Start,
    /// Second half of a coordinate pair
    Comma,
    /// A further value within the same command
    Space,
}

/// Return a 'minimal' representation of the given number
pub(crate) fn fstr(x: f64, fraction_digits: u32) -> String {
    let result = format!("{x:.prec$}", prec = fraction_digits.min(15) as usize);
    let result = if result.contains('.') {
        result.trim_end_matches('0').trim_end_matches('.')
    } else {
        &result
    };
    if result == "-0" {
        "0".to_string()
    } else {
        result.to_string()
    }
}

/// Strip the leading zero of a fraction: `0.5` => `.5`, `-0.5` => `-.5`
fn strip_leading_zero(number: String) -> String {
    if let Some(rest) = number.strip_prefix("0.") {
        format!(".{rest}")
    } else if let Some(rest) = number.strip_prefix("-0.") {
        format!("-.{rest}")
    } else {
        number
    }
}

/// Whether `next` would fuse with `prev` if written without a separator.
fn needs_separator(prev: &str, next: &str) -> bool {
    if next.starts_with('-') {
        return false;
    }
    // a second '.' always starts a new number
    !(next.starts_with('.') && prev.contains('.'))
}

/// Emit a command letter, or nothing when the previous command shares it.
pub(crate) fn push_label(
    out: &mut String,
    letter: char,
    settings: &ExportSettings,
    state: &mut ExportState,
) {
    if settings.to_polygon {
        return;
    }
    let repeatable = !matches!(letter, 'M' | 'm' | 'Z' | 'z');
    if settings.compress
        && !settings.commands_on_new_lines
        && repeatable
        && state.previous_label == Some(letter)
    {
        return;
    }
    if settings.commands_on_new_lines {
        out.push('\n');
    }
    out.push(letter);
    if !settings.compress && !matches!(letter, 'Z' | 'z') {
        out.push(' ');
    }
    state.previous_label = Some(letter);
    state.previous_number = None;
}

pub(crate) fn push_number(
    out: &mut String,
    value: f64,
    lead: Lead,
    settings: &ExportSettings,
    state: &mut ExportState,
) {
    let mut number = fstr(value, settings.fraction_digits);
    if settings.compress {
        number = strip_leading_zero(number);
        if let Some(prev) = &state.previous_number {
            if needs_separator(prev, &number) {
                out.push(if lead == Lead::Comma { ',' } else { ' ' });
            }
        }
    } else {
        match lead {
            Lead::Start => (),
            Lead::Comma => out.push(','),
            Lead::Space => out.push(' '),
        }
    }
    out.push_str(&number);
    state.previous_number = Some(number);
}

pub(crate) fn push_point(
    out: &mut String,
    point: Point,
    lead: Lead,
    settings: &ExportSettings,
    state: &mut ExportState,
) {
    push_number(out, point.x, lead, settings, state);
    push_number(out, point.y, Lead::Comma, settings, state);
}

/// Arc flags are single digits, so in compressed output they abut each
/// other and the following coordinate.
pub(crate) fn push_flag(
    out: &mut String,
    flag: bool,
    first: bool,
    settings: &ExportSettings,
    state: &mut ExportState,
) {
    if !settings.compress {
        out.push(' ');
    } else if first && state.previous_number.is_some() {
        out.push(',');
    }
    out.push(if flag { '1' } else { '0' });
    state.previous_number = None;
}
