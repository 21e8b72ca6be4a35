use tracing::{debug, trace};

use super::command::Command;
use crate::errors::Result;
use crate::geometry::Point;
use crate::settings::{Coordinates, ExportSettings};

/// Serialization context threaded through each command's export.
///
/// Cheap to clone, so `auto` mode can trial both encodings of a command
/// and keep whichever state belongs to the shorter one.
#[derive(Clone, Debug, Default)]
pub(crate) struct ExportState {
    pub(crate) to_absolute: bool,
    pub(crate) current_point: Point,
    pub(crate) sub_path_start: Point,
    /// Last command a reader of the output would see
    pub(crate) previous: Option<Command>,
    pub(crate) previous_label: Option<char>,
    pub(crate) previous_number: Option<String>,
    /// Index of the next unconsumed command
    pub(crate) next: usize,
    /// False until the first command is written; a reader starts at the
    /// output origin whatever the translation
    pub(crate) started: bool,
}

impl ExportState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current point in output coordinates.
    pub(crate) fn placed_current(&self, settings: &ExportSettings) -> Point {
        if self.started {
            settings.place(self.current_point)
        } else {
            Point::ORIGIN
        }
    }

    /// Output coordinates for an absolute point, relative to the current
    /// point unless writing absolute.
    pub(crate) fn display(&self, point: Point, settings: &ExportSettings) -> Point {
        let placed = settings.place(point);
        if self.to_absolute {
            placed
        } else {
            (placed - self.placed_current(settings)).round(settings.fraction_digits)
        }
    }
}

impl Coordinates {
    /// Export `command` in the mode this strategy selects.
    pub(crate) fn export_command(
        self,
        command: &Command,
        settings: &ExportSettings,
        state: &mut ExportState,
        commands: &[Command],
    ) -> String {
        let forced = match self {
            Coordinates::Initial => command.absolute,
            Coordinates::Absolute => true,
            Coordinates::Relative => false,
            Coordinates::Auto => {
                let mut absolute_state = state.clone();
                absolute_state.to_absolute = true;
                let absolute = command.export(settings, &mut absolute_state, commands);

                let mut relative_state = state.clone();
                relative_state.to_absolute = false;
                let relative = command.export(settings, &mut relative_state, commands);

                return if absolute.trim().len() <= relative.trim().len() {
                    *state = absolute_state;
                    absolute
                } else {
                    *state = relative_state;
                    relative
                };
            }
        };
        state.to_absolute = forced;
        command.export(settings, state, commands)
    }
}

/// Drives export one top-level command at a time.
pub(crate) struct Exporter<'a> {
    commands: &'a [Command],
    settings: ExportSettings,
    state: ExportState,
    output: String,
    line_length: usize,
}

impl<'a> Exporter<'a> {
    pub fn new(commands: &'a [Command], settings: &ExportSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            commands,
            settings: settings.normalized(),
            state: ExportState::new(),
            output: String::new(),
            line_length: 0,
        })
    }

    /// Export the next command (and any it absorbs). Returns true once
    /// every command has been consumed.
    pub fn step(&mut self) -> bool {
        let Some(command) = self.commands.get(self.state.next) else {
            return true;
        };
        self.state.next += 1;
        let fragment = self.settings.coordinates.export_command(
            command,
            &self.settings,
            &mut self.state,
            self.commands,
        );
        self.state.started = true;
        if command.is_move() {
            self.state.sub_path_start = self.state.current_point;
        }
        trace!(index = self.state.next - 1, fragment = fragment.as_str(), "exported command");
        self.append(&fragment);
        self.state.next >= self.commands.len()
    }

    fn append(&mut self, fragment: &str) {
        if fragment.is_empty() {
            return;
        }
        let separate = !self.settings.compress
            && !self.output.is_empty()
            && !self.output.ends_with([' ', '\n'])
            && !fragment.starts_with('\n');
        if let Some(limit) = self.settings.max_chars_per_line {
            let needed = self.line_length + usize::from(separate) + fragment.len();
            if !self.output.is_empty() && !fragment.starts_with('\n') && needed > limit {
                let fragment = fragment.trim_start();
                self.output.push('\n');
                self.output.push_str(fragment);
                self.line_length = fragment.len();
                return;
            }
        }
        if separate {
            self.output.push(' ');
        }
        self.output.push_str(fragment);
        self.line_length = match self.output.rfind('\n') {
            Some(pos) => self.output.len() - pos - 1,
            None => self.output.len(),
        };
    }

    pub fn finish(self) -> String {
        let output = self.output.trim().to_string();
        debug!(
            commands = self.commands.len(),
            coordinates = %self.settings.coordinates,
            length = output.len(),
            "exported path"
        );
        output
    }
}
