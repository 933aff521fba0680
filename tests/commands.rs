use sampler::acquisition::Status;
use sampler::command::{self, CommandSet, Reply, MALFORMED_REPLY};

fn handle(commands: &CommandSet<Status>, status: &mut Status, line: &str) -> String {
    let mut out = String::new();
    commands.handle_line(line, status, &mut out).unwrap();
    out
}

#[test]
fn decodes_ping() {
    let command = command::parse(r#"{"op":"ping"}"#).unwrap();
    assert_eq!(command.op, "ping");
    assert!(command.args.is_empty());
}

#[test]
fn malformed_line_only_produces_fixed_report() {
    let commands = CommandSet::with_builtins();
    let mut status = Status::default();

    let out = handle(&commands, &mut status, "not json");

    assert_eq!(out, format!("{}\n", MALFORMED_REPLY));
    assert_eq!(status, Status::default());
}

#[test]
fn builtins_reply_with_loop_state() {
    let commands = CommandSet::with_builtins();
    let mut status = Status {
        cycles: 12,
        faults: 2,
        last_cycle_faults: 0,
        last_input: 4095,
        last_output: 65025,
        stop_requested: false,
    };

    assert_eq!(
        handle(&commands, &mut status, r#"{"op":"ping"}"#),
        "{\"result\":\"pong\"}\n"
    );
    assert_eq!(
        handle(&commands, &mut status, r#"{"op":"status"}"#),
        "{\"result\":\"status\",\"values\":[12,2,4095,65025]}\n"
    );
    assert!(!status.stop_requested);

    assert_eq!(
        handle(&commands, &mut status, " {\"op\":\"stop\"} \r"),
        "{\"result\":\"stopping\"}\n"
    );
    assert!(status.stop_requested);
}

#[test]
fn custom_handler_can_replace_builtin() {
    fn quiet(_: &mut Status, _: &command::Command<'_>) -> Reply {
        Reply::with_values("quiet", &[0])
    }

    let mut commands = CommandSet::with_builtins();
    commands.register("ping", quiet).unwrap();
    let mut status = Status::default();

    assert_eq!(
        handle(&commands, &mut status, r#"{"op":"ping"}"#),
        "{\"result\":\"quiet\",\"values\":[0]}\n"
    );
}
