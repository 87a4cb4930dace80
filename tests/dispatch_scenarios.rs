//! Scenario tests for dispatch and completion.
//!
//! These tests drive the public API the way a host would: build commands,
//! register them, and feed raw lines through the registry.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use cmdtree::core::config::CommandFile;
use cmdtree::engine::declarative::register_file;
use cmdtree::engine::{
    argument, literal, literal_ignore_case, BufferedSender, BuildError, BuildLimits,
    CommandBuilder, CommandContext, CommandRegistry, ExecutionContext, Failure, IntegerArgument,
    Outcome, RegistryError, StringArgument,
};

// =============================================================================
// Fixtures
// =============================================================================

fn counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

fn bump(
    counter: &Arc<AtomicUsize>,
) -> impl Fn(&mut ExecutionContext<'_>) + Send + Sync + 'static {
    let counter = Arc::clone(counter);
    move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    }
}

fn registry() -> CommandRegistry {
    CommandRegistry::new(BuildLimits::default())
}

// =============================================================================
// End-to-end
// =============================================================================

/// `tp here` and `tp <x> <y>` reach different executors; `tp abc` reports
/// the integer parse error because no literal `abc` exists.
#[test]
fn teleport_end_to_end() {
    let e1 = counter();
    let e2 = counter();
    let mut registry = registry();
    CommandBuilder::new("tp")
        .auto_failure_handler()
        .then(literal("here").executes(bump(&e1)))
        .then(
            argument("x", IntegerArgument::new().min(0))
                .then(argument("y", IntegerArgument::new().min(0)).executes(bump(&e2))),
        )
        .register(&mut registry)
        .unwrap();
    let sender = BufferedSender::new("alice");

    assert!(registry.dispatch_line("tp here", &sender).unwrap().is_success());
    assert_eq!((e1.load(Ordering::SeqCst), e2.load(Ordering::SeqCst)), (1, 0));

    assert!(registry.dispatch_line("tp 3 4", &sender).unwrap().is_success());
    assert_eq!((e1.load(Ordering::SeqCst), e2.load(Ordering::SeqCst)), (1, 1));

    let outcome = registry.dispatch_line("tp abc", &sender).unwrap();
    assert!(matches!(
        outcome,
        Outcome::Failed(Failure::DispatchExhausted { .. })
    ));
    assert_eq!(sender.messages(), vec!["Invalid integer: abc"]);
    assert_eq!((e1.load(Ordering::SeqCst), e2.load(Ordering::SeqCst)), (1, 1));
}

/// A line that stops short of an executor is incomplete.
#[test]
fn stopping_early_is_incomplete() {
    let mut registry = registry();
    CommandBuilder::new("tp")
        .auto_failure_handler()
        .then(
            argument("x", IntegerArgument::new())
                .then(argument("y", IntegerArgument::new()).executes(|_| {})),
        )
        .register(&mut registry)
        .unwrap();
    let sender = BufferedSender::new("alice");

    let outcome = registry.dispatch_line("tp 3", &sender).unwrap();
    assert_eq!(outcome, Outcome::Failed(Failure::IncompleteCommand));
    assert_eq!(sender.messages(), vec!["Unknown or incomplete command"]);
}

// =============================================================================
// Precedence
// =============================================================================

/// When two siblings both accept a token, the earlier one wins.
#[test]
fn earlier_sibling_wins() {
    let literal_hits = counter();
    let integer_hits = counter();
    let mut registry = registry();
    CommandBuilder::new("pick")
        .then(literal("5").executes(bump(&literal_hits)))
        .then(argument("n", IntegerArgument::new()).executes(bump(&integer_hits)))
        .register(&mut registry)
        .unwrap();
    let sender = BufferedSender::new("s");

    registry.dispatch_line("pick 5", &sender).unwrap();
    registry.dispatch_line("pick 6", &sender).unwrap();
    assert_eq!(literal_hits.load(Ordering::SeqCst), 1);
    assert_eq!(integer_hits.load(Ordering::SeqCst), 1);
}

/// Once a child is chosen, a later failure does not retry its siblings.
#[test]
fn chosen_branch_is_never_abandoned() {
    let fallback = counter();
    let mut registry = registry();
    CommandBuilder::new("give")
        .then(
            argument("count", IntegerArgument::new()).then(literal("coins").executes(|_| {})),
        )
        .then(argument("rest", StringArgument::greedy()).executes(bump(&fallback)))
        .register(&mut registry)
        .unwrap();
    let sender = BufferedSender::new("s");

    let outcome = registry.dispatch_line("give 5 gems", &sender).unwrap();
    assert!(outcome.is_failed());
    assert_eq!(fallback.load(Ordering::SeqCst), 0);

    assert!(registry.dispatch_line("give lots of gems", &sender).unwrap().is_success());
    assert_eq!(fallback.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Range Boundaries
// =============================================================================

#[test]
fn integer_range_is_inclusive() {
    let mut registry = registry();
    CommandBuilder::new("level")
        .auto_failure_handler()
        .then(argument("n", IntegerArgument::new().range(1, 10)).executes(|_| {}))
        .register(&mut registry)
        .unwrap();
    let sender = BufferedSender::new("s");

    assert!(registry.dispatch_line("level 1", &sender).unwrap().is_success());
    assert!(registry.dispatch_line("level 10", &sender).unwrap().is_success());
    assert!(registry.dispatch_line("level 0", &sender).unwrap().is_failed());
    assert!(registry.dispatch_line("level 11", &sender).unwrap().is_failed());
    assert_eq!(
        sender.messages(),
        vec![
            "Integer 0 is less than the minimum value 1",
            "Integer 11 is greater than the maximum value 10",
        ]
    );
}

// =============================================================================
// Requirements
// =============================================================================

/// The first failing requirement stops evaluation of the rest and of children.
#[test]
fn requirements_short_circuit() {
    let second = counter();
    let child_gate = counter();
    let executed = counter();
    let (second_seen, child_seen) = (Arc::clone(&second), Arc::clone(&child_gate));

    let mut registry = registry();
    CommandBuilder::new("vault")
        .auto_failure_handler()
        .then(
            literal("open")
                .requires("Vault is sealed", |_| false)
                .requires("never asked", move |_| {
                    second_seen.fetch_add(1, Ordering::SeqCst);
                    true
                })
                .then(
                    literal("now")
                        .requires("child", move |_| {
                            child_seen.fetch_add(1, Ordering::SeqCst);
                            true
                        })
                        .executes(bump(&executed)),
                ),
        )
        .register(&mut registry)
        .unwrap();
    let sender = BufferedSender::new("s");

    let outcome = registry.dispatch_line("vault open now", &sender).unwrap();
    assert_eq!(
        outcome,
        Outcome::Failed(Failure::Requirement {
            message: Some("Vault is sealed".into())
        })
    );
    assert_eq!(sender.messages(), vec!["Vault is sealed"]);
    assert_eq!(second.load(Ordering::SeqCst), 0);
    assert_eq!(child_gate.load(Ordering::SeqCst), 0);
    assert_eq!(executed.load(Ordering::SeqCst), 0);
}

/// Requirements see the sender, so permissions gate per invocation.
#[test]
fn permission_gates_per_sender() {
    let mut registry = registry();
    CommandBuilder::new("ban")
        .auto_failure_handler()
        .requires("You may not ban", |ctx| ctx.sender().has_permission("ban"))
        .then(argument("who", StringArgument::word()).executes(|ctx| {
            let who: String = ctx.arguments().get("who").unwrap_or_default();
            ctx.reply(format!("banned {who}"));
        }))
        .register(&mut registry)
        .unwrap();

    let admin = BufferedSender::new("admin").with_permissions(["ban"]);
    let guest = BufferedSender::new("guest");

    assert!(registry.dispatch_line("ban mallory", &admin).unwrap().is_success());
    assert!(registry.dispatch_line("ban mallory", &guest).unwrap().is_failed());
    assert_eq!(admin.messages(), vec!["banned mallory"]);
    assert_eq!(guest.messages(), vec!["You may not ban"]);

    // Guests cannot even complete the label.
    assert_eq!(registry.suggest_line("ba", &admin).unwrap(), vec!["ban"]);
    assert!(registry.suggest_line("ba", &guest).unwrap().is_empty());
}

/// A silent requirement fails without telling the sender anything.
#[test]
fn silent_requirement_hides_the_branch() {
    let mut registry = registry();
    CommandBuilder::new("debug")
        .auto_failure_handler()
        .then(literal("status").executes(|ctx| ctx.reply("ok")))
        .then(
            literal("secrets")
                .requires_silently(|ctx| ctx.sender().has_permission("debug.secrets"))
                .executes(|ctx| ctx.reply("hunter2")),
        )
        .register(&mut registry)
        .unwrap();
    let sender = BufferedSender::new("s");

    let outcome = registry.dispatch_line("debug secrets", &sender).unwrap();
    assert_eq!(outcome, Outcome::Failed(Failure::Requirement { message: None }));
    assert!(sender.messages().is_empty());
    assert_eq!(registry.suggest_line("debug ", &sender).unwrap(), vec!["status"]);
}

// =============================================================================
// Completion
// =============================================================================

#[test]
fn literal_completion_filters_by_prefix() {
    let mut registry = registry();
    CommandBuilder::new("mob")
        .then(literal("spawn").executes(|_| {}))
        .then(literal("despawn").executes(|_| {}))
        .register(&mut registry)
        .unwrap();
    let sender = BufferedSender::new("s");

    assert_eq!(registry.suggest_line("mob sp", &sender).unwrap(), vec!["spawn"]);
    assert_eq!(registry.suggest_line("mob SP", &sender).unwrap(), vec!["spawn"]);
    assert!(registry.suggest_line("mob xy", &sender).unwrap().is_empty());
    assert_eq!(
        registry.suggest_line("mob ", &sender).unwrap(),
        vec!["spawn", "despawn"]
    );
}

#[test]
fn completion_descends_through_typed_arguments() {
    let mut registry = registry();
    CommandBuilder::new("tp")
        .then(
            argument("x", IntegerArgument::new())
                .then(
                    argument("y", IntegerArgument::new().range(0, 3).auto_suggest())
                        .executes(|_| {}),
                ),
        )
        .register(&mut registry)
        .unwrap();
    let sender = BufferedSender::new("s");

    assert_eq!(
        registry.suggest_line("tp 10 ", &sender).unwrap(),
        vec!["0", "1", "2", "3"]
    );
    assert!(registry.suggest_line("tp nope ", &sender).unwrap().is_empty());
}

#[test]
fn unknown_labels_complete_to_nothing() {
    let registry = registry();
    let sender = BufferedSender::new("s");
    assert!(registry.suggest_line("nothing here", &sender).unwrap().is_empty());
}

// =============================================================================
// Build Limits
// =============================================================================

#[test]
fn oversized_suggestion_domains_are_rejected_at_build_time() {
    let mut registry = CommandRegistry::new(BuildLimits { max_suggestions: 10 });

    let err = CommandBuilder::new("dial")
        .then(argument("n", IntegerArgument::new().range(0, 10).auto_suggest()).executes(|_| {}))
        .register(&mut registry)
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Build(BuildError::SuggestionDomainTooLarge { span: 11, limit: 10 })
    ));
    assert!(registry.is_empty());

    CommandBuilder::new("dial")
        .then(argument("n", IntegerArgument::new().range(0, 9).auto_suggest()).executes(|_| {}))
        .register(&mut registry)
        .unwrap();
    assert_eq!(registry.len(), 1);
}

/// A case-insensitive literal swallows every later sibling spelled the same.
#[test]
fn shadowed_literals_are_rejected_at_build_time() {
    let err = CommandBuilder::new("c")
        .then(literal_ignore_case("Help").executes(|_| {}))
        .then(literal("help").executes(|_| {}))
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        BuildError::DuplicateLiteral {
            parent: "c".into(),
            literal: "help".into(),
        }
    );
}

// =============================================================================
// Registry Lifecycle
// =============================================================================

#[test]
fn registry_lifecycle() {
    let mut registry = registry();
    CommandBuilder::new("teleport")
        .aliases(["tp"])
        .executes(|ctx| ctx.reply("whoosh"))
        .register(&mut registry)
        .unwrap();
    let sender = BufferedSender::new("s");

    assert!(registry.dispatch_line("TP", &sender).unwrap().is_success());
    assert!(matches!(
        CommandBuilder::new("tp").register(&mut registry),
        Err(RegistryError::Duplicate { .. })
    ));
    assert!(matches!(
        registry.dispatch_line("telport", &sender),
        Err(RegistryError::UnknownCommand { suggestion: Some(ref s), .. }) if s == "teleport"
    ));

    registry.teardown();
    registry.teardown();
    assert!(!registry.is_open());
    assert_eq!(
        registry.dispatch_line("tp", &sender).unwrap_err(),
        RegistryError::Closed
    );
    assert!(matches!(
        CommandBuilder::new("late").register(&mut registry),
        Err(RegistryError::Closed)
    ));
}

// =============================================================================
// Declarative Commands
// =============================================================================

#[test]
fn command_file_drives_the_same_engine() {
    let file = CommandFile::parse(
        r#"
        [[command]]
        name = "greet"
        description = "Say hello"

        [[command.node]]
        argument = "who"
        type = "word"
        reply = "Hello, {who}! (from {sender})"
        "#,
        std::path::Path::new("commands.toml"),
    )
    .unwrap();

    let mut registry = registry();
    assert_eq!(register_file(&file, &mut registry).unwrap(), 1);

    let sender = BufferedSender::new("alice");
    assert!(registry.dispatch_line("greet bob", &sender).unwrap().is_success());
    assert_eq!(sender.messages(), vec!["Hello, bob! (from alice)"]);
    assert_eq!(registry.lookup("greet").unwrap().usage(), vec!["greet <who>"]);
}

/// Text captured from the line is copied into replies verbatim, braces and all.
#[test]
fn replies_do_not_expand_placeholders_inside_values() {
    let file = CommandFile::parse(
        r#"
        [[command]]
        name = "say"

        [[command.node]]
        argument = "x"
        type = "integer"

          [[command.node.node]]
          argument = "msg"
          type = "greedy"
          reply = "{x}: {msg}"
        "#,
        std::path::Path::new("commands.toml"),
    )
    .unwrap();

    let mut registry = registry();
    register_file(&file, &mut registry).unwrap();

    let sender = BufferedSender::new("{x}");
    registry
        .dispatch_line("say 5 literally {x} and {sender}", &sender)
        .unwrap();
    assert_eq!(sender.messages(), vec!["5: literally {x} and {sender}"]);
}
