use super::export::ExportState;
use super::format::{push_flag, push_label, push_number, push_point, Lead};
use super::verb::Verb;
use crate::geometry::{is_inline, Point};
use crate::settings::{is_mirrored, ExportSettings, TransformSettings};

/// Geometric payload of a single path command.
///
/// Points are stored exactly as written: absolute, or relative to the
/// current point, according to the owning `Command`'s `absolute` flag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CommandKind {
    Move {
        to: Point,
    },
    Line {
        to: Point,
    },
    Close,
    Cubic {
        control1: Point,
        control2: Point,
        to: Point,
    },
    Quadratic {
        control: Point,
        to: Point,
    },
    Arc {
        radius: Point,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Command {
    pub kind: CommandKind,
    pub absolute: bool,
}

/// Running position while walking a sequence of commands.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct PathCursor {
    current_point: Point,
    sub_path_start: Point,
    /// False until the first command; the path starts at a fixed origin
    started: bool,
}

impl PathCursor {
    pub fn current_point(&self) -> Point {
        self.current_point
    }

    pub fn sub_path_start(&self) -> Point {
        self.sub_path_start
    }

    pub fn advance(&mut self, command: &Command) {
        self.current_point = command.position(self.current_point, self.sub_path_start);
        if command.is_move() {
            self.sub_path_start = self.current_point;
        }
        self.started = true;
    }
}

impl Command {
    pub fn new(kind: CommandKind, absolute: bool) -> Self {
        Self { kind, absolute }
    }

    /// Build a command from one group of values (`verb.arity()` of them).
    ///
    /// `previous` and `current` give the context needed by the single-axis
    /// and shorthand forms, which are stored in their expanded form.
    pub(crate) fn from_values(
        verb: Verb,
        values: &[f64],
        absolute: bool,
        previous: Option<&Command>,
        current: Point,
    ) -> Self {
        let pt = |i: usize| Point::new(values[i], values[i + 1]);
        let kind = match verb {
            Verb::Move => CommandKind::Move { to: pt(0) },
            Verb::Line => CommandKind::Line { to: pt(0) },
            Verb::Horizontal => CommandKind::Line {
                to: Point::new(values[0], if absolute { current.y } else { 0. }),
            },
            Verb::Vertical => CommandKind::Line {
                to: Point::new(if absolute { current.x } else { 0. }, values[0]),
            },
            Verb::Cubic => CommandKind::Cubic {
                control1: pt(0),
                control2: pt(2),
                to: pt(4),
            },
            Verb::SmoothCubic => CommandKind::Cubic {
                control1: reflected(previous.and_then(Command::cubic_control), absolute, current),
                control2: pt(0),
                to: pt(2),
            },
            Verb::Quadratic => CommandKind::Quadratic {
                control: pt(0),
                to: pt(2),
            },
            Verb::SmoothQuadratic => CommandKind::Quadratic {
                control: reflected(
                    previous.and_then(Command::quadratic_control),
                    absolute,
                    current,
                ),
                to: pt(0),
            },
            Verb::Arc => CommandKind::Arc {
                radius: pt(0),
                rotation: values[2],
                large_arc: values[3] != 0.,
                sweep: values[4] != 0.,
                to: pt(5),
            },
            Verb::Close => CommandKind::Close,
        };
        Self::new(kind, absolute)
    }

    /// The family this command was stored as; shorthand and single-axis
    /// forms report their expanded verb.
    pub fn verb(&self) -> Verb {
        match self.kind {
            CommandKind::Move { .. } => Verb::Move,
            CommandKind::Line { .. } => Verb::Line,
            CommandKind::Close => Verb::Close,
            CommandKind::Cubic { .. } => Verb::Cubic,
            CommandKind::Quadratic { .. } => Verb::Quadratic,
            CommandKind::Arc { .. } => Verb::Arc,
        }
    }

    pub fn is_move(&self) -> bool {
        matches!(self.kind, CommandKind::Move { .. })
    }

    pub fn is_line(&self) -> bool {
        matches!(self.kind, CommandKind::Line { .. })
    }

    fn end(&self) -> Option<Point> {
        match self.kind {
            CommandKind::Move { to }
            | CommandKind::Line { to }
            | CommandKind::Cubic { to, .. }
            | CommandKind::Quadratic { to, .. }
            | CommandKind::Arc { to, .. } => Some(to),
            CommandKind::Close => None,
        }
    }

    fn resolve(&self, point: Point, current: Point) -> Point {
        if self.absolute {
            point
        } else {
            current + point
        }
    }

    /// Absolute point this command moves to.
    pub fn position(&self, current: Point, sub_path_start: Point) -> Point {
        match self.end() {
            Some(to) => self.resolve(to, current),
            None => sub_path_start,
        }
    }

    /// Vector from this curve's end point to its last control point, which a
    /// following shorthand curve reflects through the current point.
    pub fn control_point(&self) -> Option<Point> {
        match self.kind {
            CommandKind::Cubic { control2, to, .. } => Some(to - control2),
            CommandKind::Quadratic { control, to } => Some(to - control),
            _ => None,
        }
    }

    fn cubic_control(&self) -> Option<Point> {
        match self.kind {
            CommandKind::Cubic { .. } => self.control_point(),
            _ => None,
        }
    }

    fn quadratic_control(&self) -> Option<Point> {
        match self.kind {
            CommandKind::Quadratic { .. } => self.control_point(),
            _ => None,
        }
    }

    /// Call `callback(point, is_control, index)` for each absolute point of
    /// this command, advancing `cursor` past it.
    pub(crate) fn each_point<F>(&self, cursor: &mut PathCursor, callback: &mut F, index: usize)
    where
        F: FnMut(Point, bool, usize),
    {
        let current = cursor.current_point();
        match self.kind {
            CommandKind::Cubic {
                control1, control2, ..
            } => {
                callback(self.resolve(control1, current), true, index);
                callback(self.resolve(control2, current), true, index);
            }
            CommandKind::Quadratic { control, .. } => {
                callback(self.resolve(control, current), true, index);
            }
            _ => (),
        }
        cursor.advance(self);
        if !matches!(self.kind, CommandKind::Close) {
            callback(cursor.current_point(), false, index);
        }
    }

    /// Apply `settings` to this command's resolved coordinates, storing the
    /// result back in the command's own absolute / relative form.
    ///
    /// `cursor` is the position before this command, in untransformed space.
    pub(crate) fn transform(&mut self, settings: &TransformSettings, cursor: &PathCursor) {
        let current = cursor.current_point();
        let origin = if cursor.started {
            settings.apply(current)
        } else {
            Point::ORIGIN
        };
        let absolute = self.absolute;
        let map = |p: Point| {
            if absolute {
                return settings.apply(p);
            }
            let delta = settings.apply(current + p) - origin;
            match settings.fraction_digits {
                Some(digits) => delta.round(digits),
                None => delta,
            }
        };
        self.kind = match self.kind {
            CommandKind::Move { to } => CommandKind::Move { to: map(to) },
            CommandKind::Line { to } => CommandKind::Line { to: map(to) },
            CommandKind::Close => CommandKind::Close,
            CommandKind::Cubic {
                control1,
                control2,
                to,
            } => CommandKind::Cubic {
                control1: map(control1),
                control2: map(control2),
                to: map(to),
            },
            CommandKind::Quadratic { control, to } => CommandKind::Quadratic {
                control: map(control),
                to: map(to),
            },
            CommandKind::Arc {
                radius,
                rotation,
                large_arc,
                sweep,
                to,
            } => {
                let scale = settings.scale();
                let radius = radius * Point::new(scale.x.abs(), scale.y.abs());
                let mirrored = is_mirrored(settings.scale);
                CommandKind::Arc {
                    radius: Point::new(settings.round(radius.x), settings.round(radius.y)),
                    rotation: settings.round(if mirrored { -rotation } else { rotation }),
                    large_arc,
                    sweep: sweep != mirrored,
                    to: map(to),
                }
            }
        };
    }

    /// Write this command as path data, consuming any following commands
    /// it can be combined with from `commands[state.next..]`.
    pub(crate) fn export(
        &self,
        settings: &ExportSettings,
        state: &mut ExportState,
        commands: &[Command],
    ) -> String {
        let mut out = String::new();
        match self.kind {
            CommandKind::Move { .. } => self.export_move(&mut out, settings, state, commands),
            CommandKind::Line { .. } => self.export_line(&mut out, settings, state, commands),
            CommandKind::Close => {
                push_label(&mut out, self.letter(Verb::Close, state), settings, state);
                state.current_point = state.sub_path_start;
                state.previous = Some(*self);
            }
            CommandKind::Cubic { .. } => self.export_cubic(&mut out, settings, state),
            CommandKind::Quadratic { .. } => self.export_quadratic(&mut out, settings, state),
            CommandKind::Arc { .. } => self.export_arc(&mut out, settings, state),
        }
        out
    }

    fn letter(&self, verb: Verb, state: &ExportState) -> char {
        verb.letter(state.to_absolute)
    }

    fn export_move(
        &self,
        out: &mut String,
        settings: &ExportSettings,
        state: &mut ExportState,
        commands: &[Command],
    ) {
        let mut end = self.position(state.current_point, state.sub_path_start);
        let mut last = *self;
        if settings.combine {
            // nothing is drawn between successive moves
            while let Some(next) = commands.get(state.next).filter(|c| c.is_move()) {
                end = next.position(end, state.sub_path_start);
                last = *next;
                state.next += 1;
            }
        }
        push_label(out, self.letter(Verb::Move, state), settings, state);
        push_point(out, state.display(end, settings), Lead::Start, settings, state);
        state.current_point = end;
        state.previous = Some(last);
    }

    fn export_line(
        &self,
        out: &mut String,
        settings: &ExportSettings,
        state: &mut ExportState,
        commands: &[Command],
    ) {
        let start = state.current_point;
        let mut end = self.position(start, state.sub_path_start);
        let mut last = *self;
        if settings.combine {
            while let Some(next) = commands.get(state.next).filter(|c| c.is_line()) {
                let next_end = next.position(end, state.sub_path_start);
                if !is_inline(start, end, next_end) {
                    break;
                }
                end = next_end;
                last = *next;
                state.next += 1;
            }
        }

        let (from, to) = (state.placed_current(settings), settings.place(end));
        if from.is_same(&to) {
            // zero length: nothing to draw, and nothing a reader would see
            // as the previous command
            state.current_point = end;
            return;
        }
        let display = state.display(end, settings);
        if settings.to_polygon {
            push_point(out, display, Lead::Start, settings, state);
        } else if from.y == to.y {
            push_label(out, self.letter(Verb::Horizontal, state), settings, state);
            push_number(out, display.x, Lead::Start, settings, state);
        } else if from.x == to.x {
            push_label(out, self.letter(Verb::Vertical, state), settings, state);
            push_number(out, display.y, Lead::Start, settings, state);
        } else {
            push_label(out, self.letter(Verb::Line, state), settings, state);
            push_point(out, display, Lead::Start, settings, state);
        }
        state.current_point = end;
        state.previous = Some(last);
    }

    fn export_cubic(&self, out: &mut String, settings: &ExportSettings, state: &mut ExportState) {
        let CommandKind::Cubic {
            control1,
            control2,
            to,
        } = self.kind
        else {
            return;
        };
        let start = state.current_point;
        let (control1, control2, end) = (
            self.resolve(control1, start),
            self.resolve(control2, start),
            self.resolve(to, start),
        );
        if settings.to_polygon {
            push_point(out, state.display(end, settings), Lead::Start, settings, state);
        } else {
            let reflection = state.previous.as_ref().and_then(Command::cubic_control);
            let shorthand = is_reflection(control1 - start, reflection);
            if shorthand {
                push_label(out, self.letter(Verb::SmoothCubic, state), settings, state);
            } else {
                push_label(out, self.letter(Verb::Cubic, state), settings, state);
                push_point(out, state.display(control1, settings), Lead::Start, settings, state);
            }
            let lead = if shorthand { Lead::Start } else { Lead::Space };
            push_point(out, state.display(control2, settings), lead, settings, state);
            push_point(out, state.display(end, settings), Lead::Space, settings, state);
        }
        state.current_point = end;
        state.previous = Some(*self);
    }

    fn export_quadratic(
        &self,
        out: &mut String,
        settings: &ExportSettings,
        state: &mut ExportState,
    ) {
        let CommandKind::Quadratic { control, to } = self.kind else {
            return;
        };
        let start = state.current_point;
        let (control, end) = (self.resolve(control, start), self.resolve(to, start));
        if settings.to_polygon {
            push_point(out, state.display(end, settings), Lead::Start, settings, state);
        } else {
            let reflection = state.previous.as_ref().and_then(Command::quadratic_control);
            if is_reflection(control - start, reflection) {
                push_label(out, self.letter(Verb::SmoothQuadratic, state), settings, state);
                push_point(out, state.display(end, settings), Lead::Start, settings, state);
            } else {
                push_label(out, self.letter(Verb::Quadratic, state), settings, state);
                push_point(out, state.display(control, settings), Lead::Start, settings, state);
                push_point(out, state.display(end, settings), Lead::Space, settings, state);
            }
        }
        state.current_point = end;
        state.previous = Some(*self);
    }

    fn export_arc(&self, out: &mut String, settings: &ExportSettings, state: &mut ExportState) {
        let CommandKind::Arc {
            radius,
            rotation,
            large_arc,
            sweep,
            to,
        } = self.kind
        else {
            return;
        };
        let end = self.resolve(to, state.current_point);
        if settings.to_polygon {
            push_point(out, state.display(end, settings), Lead::Start, settings, state);
        } else {
            let scale = settings.scale.unwrap_or(Point::new(1., 1.));
            let radius = radius * Point::new(scale.x.abs(), scale.y.abs());
            let mirrored = is_mirrored(settings.scale);
            let rotation = if mirrored { -rotation } else { rotation };

            push_label(out, self.letter(Verb::Arc, state), settings, state);
            push_point(out, radius, Lead::Start, settings, state);
            push_number(out, rotation, Lead::Space, settings, state);
            push_flag(out, large_arc, true, settings, state);
            push_flag(out, sweep != mirrored, false, settings, state);
            push_point(out, state.display(end, settings), Lead::Space, settings, state);
        }
        state.current_point = end;
        state.previous = Some(*self);
    }
}

/// Synthesized first control point of a shorthand curve.
fn reflected(control: Option<Point>, absolute: bool, current: Point) -> Point {
    match (control, absolute) {
        (Some(v), true) => current + v,
        (Some(v), false) => v,
        (None, true) => current,
        (None, false) => Point::ORIGIN,
    }
}

/// Whether a curve whose first control sits at `offset` from the current
/// point can drop it in favour of the reader's implicit reflection.
fn is_reflection(offset: Point, reflection: Option<Point>) -> bool {
    offset.approx_eq(&reflection.unwrap_or(Point::ORIGIN))
}
