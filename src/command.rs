//! Line-oriented JSON commands.
//!
//! Each line is decoded as `{"op":"<name>","args":[...]}` and routed to the handler registered
//! for `op`. Anything that fails to decode is answered with [`MALFORMED_REPLY`] and has no effect.

use crate::config;
use core::fmt;
use heapless::Vec;
use serde::{Deserialize, Serialize};

mod line;

pub use line::{Line, LineReader};

/// Fixed report for a line that could not be decoded.
pub const MALFORMED_REPLY: &str = r#"{"result":"unknown or malformed command"}"#;

/// A decoded command, borrowing from the line it came from.
#[derive(Debug, PartialEq, Deserialize)]
pub struct Command<'a> {
    pub op: &'a str,
    #[serde(default)]
    pub args: Vec<f32, { config::command::MAX_ARGS }>,
}

/// The line was not a command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Malformed;

impl fmt::Display for Malformed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown or malformed command")
    }
}

/// Decode one line (surrounding whitespace and line terminators are ignored).
pub fn parse(line: &str) -> Result<Command<'_>, Malformed> {
    match serde_json_core::from_str::<Command<'_>>(line.trim()) {
        Ok((command, _)) => Ok(command),
        Err(_) => Err(Malformed),
    }
}

/// Response to a dispatched command, encoded as one JSON line.
#[derive(Debug, PartialEq, Serialize)]
pub struct Reply {
    pub result: &'static str,
    #[serde(skip_serializing_if = "no_values")]
    pub values: Vec<i32, { config::command::MAX_ARGS }>,
}

fn no_values(values: &Vec<i32, { config::command::MAX_ARGS }>) -> bool {
    values.is_empty()
}

impl Reply {
    pub fn new(result: &'static str) -> Self {
        Self {
            result,
            values: Vec::new(),
        }
    }

    pub fn with_values(result: &'static str, values: &[i32]) -> Self {
        let mut reply = Self::new(result);
        // extra values beyond capacity are dropped
        for &v in values.iter().take(reply.values.capacity()) {
            let _ = reply.values.push(v);
        }
        reply
    }

    pub fn unknown_operation() -> Self {
        Self::new("unknown operation")
    }

    /// Write the reply followed by a newline.
    pub fn write_to<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        let encoded: heapless::String<{ config::command::MAX_REPLY_LEN }> =
            serde_json_core::to_string(self).map_err(|_| fmt::Error)?;
        out.write_str(&encoded)?;
        out.write_char('\n')
    }
}

pub type Handler<Ctx> = fn(&mut Ctx, &Command<'_>) -> Reply;

/// The registered command set is full.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Full;

/// Mapping from operation name to handler.
pub struct CommandSet<Ctx, const H: usize = { config::command::MAX_HANDLERS }> {
    handlers: Vec<(&'static str, Handler<Ctx>), H>,
}

impl<Ctx, const H: usize> Default for CommandSet<Ctx, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx, const H: usize> CommandSet<Ctx, H> {
    pub const fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register `handler` for `op`, replacing any earlier handler for the same name.
    pub fn register(&mut self, op: &'static str, handler: Handler<Ctx>) -> Result<(), Full> {
        match self.handlers.iter_mut().find(|(name, _)| *name == op) {
            Some(entry) => {
                entry.1 = handler;
                Ok(())
            }
            None => self.handlers.push((op, handler)).map_err(|_| Full),
        }
    }

    pub fn dispatch(&self, ctx: &mut Ctx, command: &Command<'_>) -> Reply {
        match self.handlers.iter().find(|(name, _)| *name == command.op) {
            Some((_, handler)) => handler(ctx, command),
            None => Reply::unknown_operation(),
        }
    }

    /// Decode `line`, dispatch it, and write the reply (or the malformed report) to `out`.
    pub fn handle_line<W: fmt::Write>(&self, line: &str, ctx: &mut Ctx, out: &mut W) -> fmt::Result {
        match parse(line) {
            Ok(command) => {
                debug!("Dispatching command {}", command.op);
                self.dispatch(ctx, &command).write_to(out)
            }
            Err(Malformed) => {
                warn!("Malformed command line");
                write_malformed(out)
            }
        }
    }
}

pub fn write_malformed<W: fmt::Write>(out: &mut W) -> fmt::Result {
    out.write_str(MALFORMED_REPLY)?;
    out.write_char('\n')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        hits: i32,
    }

    fn bump(ctx: &mut Counter, command: &Command<'_>) -> Reply {
        #[allow(clippy::cast_possible_truncation)]
        let by = command.args.first().map_or(1, |&a| a as i32);
        ctx.hits += by;
        Reply::with_values("ok", &[ctx.hits])
    }

    #[test]
    fn parses_op() {
        let command = parse(r#"{"op":"ping"}"#).unwrap();
        assert_eq!(command.op, "ping");
        assert!(command.args.is_empty());
    }

    #[test]
    fn parses_args_and_trailing_newline() {
        let command = parse("{\"op\":\"bump\",\"args\":[2,0.5]}\r\n").unwrap();
        assert_eq!(command.op, "bump");
        assert_eq!(&command.args[..], &[2.0, 0.5]);
    }

    #[test]
    fn rejects_non_json() {
        assert_eq!(parse("not json"), Err(Malformed));
        assert_eq!(parse(""), Err(Malformed));
        assert_eq!(parse(r#"{"args":[1]}"#), Err(Malformed));
        assert_eq!(parse(r#"{"op":"x","args":[1,2,3,4,5]}"#), Err(Malformed));
    }

    #[test]
    fn dispatches_to_registered_handler() {
        let mut set = CommandSet::<Counter>::new();
        set.register("bump", bump).unwrap();

        let mut ctx = Counter::default();
        let mut out = String::new();
        set.handle_line(r#"{"op":"bump","args":[3]}"#, &mut ctx, &mut out)
            .unwrap();

        assert_eq!(ctx.hits, 3);
        assert_eq!(out, "{\"result\":\"ok\",\"values\":[3]}\n");
    }

    #[test]
    fn unknown_operation_has_no_effect() {
        let mut set = CommandSet::<Counter>::new();
        set.register("bump", bump).unwrap();

        let mut ctx = Counter::default();
        let mut out = String::new();
        set.handle_line(r#"{"op":"jump"}"#, &mut ctx, &mut out).unwrap();

        assert_eq!(ctx.hits, 0);
        assert_eq!(out, "{\"result\":\"unknown operation\"}\n");
    }

    #[test]
    fn malformed_line_gets_fixed_report() {
        let set = CommandSet::<Counter>::new();
        let mut ctx = Counter::default();
        let mut out = String::new();
        set.handle_line("not json", &mut ctx, &mut out).unwrap();

        assert_eq!(ctx.hits, 0);
        assert_eq!(out, "{\"result\":\"unknown or malformed command\"}\n");
    }

    #[test]
    fn register_replaces_and_fills_up() {
        fn zero(_: &mut Counter, _: &Command<'_>) -> Reply {
            Reply::new("zero")
        }

        let mut set = CommandSet::<Counter, 2>::new();
        set.register("a", bump).unwrap();
        set.register("a", zero).unwrap();
        set.register("b", bump).unwrap();
        assert_eq!(set.register("c", bump), Err(Full));

        let mut ctx = Counter::default();
        let command = parse(r#"{"op":"a"}"#).unwrap();
        assert_eq!(set.dispatch(&mut ctx, &command), Reply::new("zero"));
    }
}
