//! Path data model: parsing, building, transforming and export.

mod command;
mod export;
mod format;
mod syntax;
mod verb;

use std::fmt;
use std::str::FromStr;

use tracing::debug;

pub use command::{Command, CommandKind};
pub use syntax::{split_tokens, tokenize, PathSyntax, SvgPathSyntax};
pub use verb::{Args, Verb};

use crate::errors::{Error, Result};
use crate::geometry::Point;
use crate::settings::{ExportSettings, TransformSettings};
use command::PathCursor;
use export::Exporter;

/// An ordered sequence of path commands, starting from the origin.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: Vec<Command>,
    /// Position after the last command
    cursor: PathCursor,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse path data (`"M 1,2 L 3,4"`) or a polygon point list
    /// (`"1,2 3,4"`, implicitly closed).
    pub fn parse(data: &str) -> Result<Self> {
        let mut path = Self::new();
        path.import(data)?;
        Ok(path)
    }

    /// Replace the contents of this path with parsed data.
    ///
    /// On error the path is left unchanged.
    pub fn import(&mut self, data: &str) -> Result<&mut Self> {
        let data = data.trim();
        let mut imported = Self::new();
        match data.chars().next() {
            None => (),
            Some(c) if Verb::from_letter(c).is_some() => imported.import_path_data(data)?,
            Some(_) => imported.import_points(data)?,
        }
        *self = imported;
        Ok(self)
    }

    fn import_path_data(&mut self, data: &str) -> Result<()> {
        let mut rest = data;
        while let Some(letter) = rest.chars().next() {
            let (verb, absolute) = Verb::from_letter(letter).ok_or_else(|| {
                Error::InvalidValue("path command".to_string(), letter.to_string())
            })?;
            let body = &rest[letter.len_utf8()..];
            let end = body
                .find(|c| Verb::from_letter(c).is_some())
                .unwrap_or(body.len());
            let values = Args::from(&body[..end]).numbers(verb)?;
            self.push(verb, &values, absolute)?;
            rest = &body[end..];
        }
        Ok(())
    }

    fn import_points(&mut self, data: &str) -> Result<()> {
        let values = tokenize(data)?;
        // chunks_exact to ignore any unpaired final number
        for (i, pair) in values.chunks_exact(2).enumerate() {
            let verb = if i == 0 { Verb::Move } else { Verb::Line };
            self.push(verb, pair, true)?;
        }
        if !self.commands.is_empty() {
            self.push(Verb::Close, &[], true)?;
        }
        Ok(())
    }

    /// Append the command(s) described by `values`, all-or-nothing.
    fn push(&mut self, verb: Verb, values: &[f64], absolute: bool) -> Result<&mut Self> {
        let groups = verb.groups(values)?;
        for (i, group) in groups.into_iter().enumerate() {
            // extra pairs after a move are implicit lines
            let verb = if verb == Verb::Move && i > 0 {
                Verb::Line
            } else {
                verb
            };
            let command = Command::from_values(
                verb,
                group,
                absolute,
                self.commands.last(),
                self.cursor.current_point(),
            );
            self.cursor.advance(&command);
            self.commands.push(command);
        }
        Ok(self)
    }

    fn push_args(&mut self, verb: Verb, args: Args, absolute: bool) -> Result<&mut Self> {
        let values = args.numbers(verb)?;
        self.push(verb, &values, absolute)
    }

    pub fn move_to(&mut self, args: impl Into<Args>, absolute: bool) -> Result<&mut Self> {
        self.push_args(Verb::Move, args.into(), absolute)
    }

    pub fn line_to(&mut self, args: impl Into<Args>, absolute: bool) -> Result<&mut Self> {
        self.push_args(Verb::Line, args.into(), absolute)
    }

    pub fn horizontal_to(&mut self, args: impl Into<Args>, absolute: bool) -> Result<&mut Self> {
        self.push_args(Verb::Horizontal, args.into(), absolute)
    }

    pub fn vertical_to(&mut self, args: impl Into<Args>, absolute: bool) -> Result<&mut Self> {
        self.push_args(Verb::Vertical, args.into(), absolute)
    }

    /// Cubic curve(s) from groups of six values, or the shorthand form when
    /// given exactly four.
    pub fn cubic_to(&mut self, args: impl Into<Args>, absolute: bool) -> Result<&mut Self> {
        let values = args.into().numbers(Verb::Cubic)?;
        let verb = if values.len() == Verb::SmoothCubic.arity() {
            Verb::SmoothCubic
        } else {
            Verb::Cubic
        };
        self.push(verb, &values, absolute)
    }

    pub fn smooth_cubic_to(&mut self, args: impl Into<Args>, absolute: bool) -> Result<&mut Self> {
        self.push_args(Verb::SmoothCubic, args.into(), absolute)
    }

    /// Quadratic curve(s) from groups of four values, or the shorthand form
    /// when given exactly two.
    pub fn quadratic_to(&mut self, args: impl Into<Args>, absolute: bool) -> Result<&mut Self> {
        let values = args.into().numbers(Verb::Quadratic)?;
        let verb = if values.len() == Verb::SmoothQuadratic.arity() {
            Verb::SmoothQuadratic
        } else {
            Verb::Quadratic
        };
        self.push(verb, &values, absolute)
    }

    pub fn smooth_quadratic_to(
        &mut self,
        args: impl Into<Args>,
        absolute: bool,
    ) -> Result<&mut Self> {
        self.push_args(Verb::SmoothQuadratic, args.into(), absolute)
    }

    pub fn arc_to(&mut self, args: impl Into<Args>, absolute: bool) -> Result<&mut Self> {
        self.push_args(Verb::Arc, args.into(), absolute)
    }

    pub fn close(&mut self, absolute: bool) -> &mut Self {
        let command = Command::new(CommandKind::Close, absolute);
        self.cursor.advance(&command);
        self.commands.push(command);
        self
    }

    /// Replace the payload of the command at `index`, keeping its family and
    /// absolute / relative mode. An out-of-range index is ignored.
    pub fn update(&mut self, index: usize, values: impl Into<Args>) -> Result<&mut Self> {
        let Some(existing) = self.commands.get(index).copied() else {
            debug!(index, len = self.commands.len(), "update index out of range");
            return Ok(self);
        };
        let values = values.into().numbers(existing.verb())?;
        let verb = match existing.verb() {
            Verb::Cubic if values.len() == Verb::SmoothCubic.arity() => Verb::SmoothCubic,
            Verb::Quadratic if values.len() == Verb::SmoothQuadratic.arity() => {
                Verb::SmoothQuadratic
            }
            verb => verb,
        };
        let groups = verb.groups(&values)?;
        let previous = index.checked_sub(1).map(|i| self.commands[i]);
        let current = self.cursor_at(index).current_point();
        self.commands[index] =
            Command::from_values(verb, groups[0], existing.absolute, previous.as_ref(), current);
        self.cursor = self.cursor_at(self.commands.len());
        Ok(self)
    }

    fn cursor_at(&self, index: usize) -> PathCursor {
        let mut cursor = PathCursor::default();
        for command in &self.commands[..index] {
            cursor.advance(command);
        }
        cursor
    }

    /// Call `callback(point, is_control, index)` with every absolute point in
    /// the path, in order.
    pub fn each_point<F>(&self, mut callback: F) -> &Self
    where
        F: FnMut(Point, bool, usize),
    {
        let mut cursor = PathCursor::default();
        for (index, command) in self.commands.iter().enumerate() {
            command.each_point(&mut cursor, &mut callback, index);
        }
        self
    }

    /// Translate, scale and round every command in place.
    pub fn transform(&mut self, settings: &TransformSettings) -> Result<&mut Self> {
        settings.validate()?;
        let mut cursor = PathCursor::default();
        for command in &mut self.commands {
            let original = *command;
            command.transform(settings, &cursor);
            cursor.advance(&original);
        }
        self.cursor = self.cursor_at(self.commands.len());
        Ok(self)
    }

    pub fn export(&self, settings: &ExportSettings) -> Result<String> {
        let mut exporter = Exporter::new(&self.commands, settings)?;
        while !exporter.step() {}
        Ok(exporter.finish())
    }

    /// As `export`, but when `settings.async_export` is set, yields to the
    /// runtime between commands. The output is identical.
    pub async fn export_async(&self, settings: &ExportSettings) -> Result<String> {
        let mut exporter = Exporter::new(&self.commands, settings)?;
        while !exporter.step() {
            if settings.async_export {
                tokio::task::yield_now().await;
            }
        }
        Ok(exporter.finish())
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Absolute position after the last command.
    pub fn end_point(&self) -> Point {
        self.cursor.current_point()
    }

    /// Start of the last sub-path, where a `close` would return to.
    pub fn sub_path_start(&self) -> Point {
        self.cursor.sub_path_start()
    }
}

impl FromStr for Path {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.export(&ExportSettings::default()).map_err(|_| fmt::Error)?;
        write!(f, "{data}")
    }
}
