//! Concurrent use of one registered tree.
//!
//! A registered tree is shared read-only: executions and completions from
//! different senders may run on different threads at once, each with its
//! own context.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use cmdtree::engine::{
    argument, literal, BufferedSender, BuildLimits, CommandBuilder, CommandContext,
    CommandRegistry, IntegerArgument,
};

const THREADS: usize = 8;
const ROUNDS: usize = 200;

fn shared_registry(executed: &Arc<AtomicUsize>) -> CommandRegistry {
    let executed = Arc::clone(executed);
    let mut registry = CommandRegistry::new(BuildLimits::default());
    CommandBuilder::new("add")
        .auto_failure_handler()
        .requires("Read-only sender", |ctx| ctx.sender().has_permission("write"))
        .then(
            argument("a", IntegerArgument::new().range(0, 50).auto_suggest()).then(
                argument("b", IntegerArgument::new()).executes(move |ctx| {
                    let a: i64 = ctx.arguments().get("a").unwrap_or_default();
                    let b: i64 = ctx.arguments().get("b").unwrap_or_default();
                    executed.fetch_add(1, Ordering::SeqCst);
                    ctx.reply((a + b).to_string());
                }),
            ),
        )
        .then(literal("help").executes(|ctx| ctx.reply("add <a> <b>")))
        .register(&mut registry)
        .unwrap();
    registry
}

/// Each thread's captured values stay in its own context.
#[test]
fn parallel_dispatch_keeps_contexts_apart() {
    let executed = Arc::new(AtomicUsize::new(0));
    let registry = shared_registry(&executed);

    thread::scope(|scope| {
        for t in 0..THREADS {
            let registry = &registry;
            scope.spawn(move || {
                let sender =
                    BufferedSender::new(format!("worker-{t}")).with_permissions(["write"]);
                for round in 0..ROUNDS {
                    let a = (t + round) % 50;
                    let outcome = registry
                        .dispatch_line(&format!("add {a} {round}"), &sender)
                        .unwrap();
                    assert!(outcome.is_success());
                    assert_eq!(
                        sender.take_messages(),
                        vec![(a + round).to_string()],
                        "thread {t} round {round}"
                    );
                }
            });
        }
    });

    assert_eq!(executed.load(Ordering::SeqCst), THREADS * ROUNDS);
}

/// Completion and execution run side by side against the same tree.
#[test]
fn completion_runs_alongside_execution() {
    let executed = Arc::new(AtomicUsize::new(0));
    let registry = shared_registry(&executed);

    thread::scope(|scope| {
        scope.spawn(|| {
            let writer = BufferedSender::new("writer").with_permissions(["write"]);
            for round in 0..ROUNDS {
                assert!(registry
                    .dispatch_line(&format!("add 1 {round}"), &writer)
                    .unwrap()
                    .is_success());
            }
        });
        scope.spawn(|| {
            let writer = BufferedSender::new("completer").with_permissions(["write"]);
            for _ in 0..ROUNDS {
                let suggestions = registry.suggest_line("add 4", &writer).unwrap();
                assert_eq!(
                    suggestions,
                    vec!["4", "40", "41", "42", "43", "44", "45", "46", "47", "48", "49"]
                );
            }
        });
        scope.spawn(|| {
            let reader = BufferedSender::new("reader");
            for _ in 0..ROUNDS {
                assert!(registry.dispatch_line("add 1 2", &reader).unwrap().is_failed());
                assert!(registry.suggest_line("add ", &reader).unwrap().is_empty());
            }
            assert_eq!(reader.messages().len(), ROUNDS);
        });
    });

    assert_eq!(executed.load(Ordering::SeqCst), ROUNDS);
}

/// Clones of a command share one tree.
#[test]
fn commands_are_shareable_across_threads() {
    let command = CommandBuilder::new("ping")
        .executes(|ctx| ctx.reply(format!("pong {}", ctx.sender().name())))
        .build()
        .unwrap();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let command = command.clone();
            thread::spawn(move || {
                let sender = BufferedSender::new(format!("s{t}"));
                assert!(command.on_command(&sender, "ping", &[]).is_success());
                sender.messages()
            })
        })
        .collect();

    for (t, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), vec![format!("pong s{t}")]);
    }
}
