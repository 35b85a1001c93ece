use macro_core::scripts::{Phase, feed_item_script};
use macro_core::sequencer::{
    CycleLog, DEFAULT_FEED_REPEATS, MacroProgram, Sequencer, SequencerState,
};

fn run(sequencer: &mut Sequencer<CycleLog<64>>, ticks: u32) {
    for _ in 0..ticks {
        sequencer.tick();
    }
}

fn enter_feed(program: MacroProgram) -> Sequencer<CycleLog<64>> {
    let mut sequencer = Sequencer::with_observer(program, CycleLog::new());
    run(
        &mut sequencer,
        program.phase_ticks(Phase::Sync) + program.phase_ticks(Phase::Buy),
    );
    assert_eq!(sequencer.phase(), Phase::Feed);
    sequencer
}

#[test]
fn feed_repeats_ten_times_before_after_feed() {
    let program = MacroProgram::standard();
    let pass = feed_item_script().ticks_per_pass();
    let mut sequencer = enter_feed(program);

    for completed in 1..u32::from(DEFAULT_FEED_REPEATS) {
        run(&mut sequencer, pass);
        let state = sequencer.state();
        assert_eq!(state.phase, Phase::Feed, "after {completed} passes");
        assert_eq!(state.step_index, 0);
        assert_eq!(
            u32::from(state.repeats_remaining),
            u32::from(DEFAULT_FEED_REPEATS) - completed
        );
    }

    run(&mut sequencer, pass);
    assert_eq!(
        sequencer.state(),
        SequencerState {
            phase: Phase::AfterFeed,
            step_index: 0,
            elapsed_ticks: 0,
            repeats_remaining: DEFAULT_FEED_REPEATS,
        }
    );

    let log = sequencer.observer();
    assert_eq!(log.count_completed(Phase::Feed), 10);
    let feed_transitions = log
        .oldest_first()
        .filter(|event| event.completed == Phase::Feed && event.advanced())
        .count();
    assert_eq!(feed_transitions, 1);
}

#[test]
fn one_pass_short_of_the_last_repeat_stays_in_feed() {
    let program = MacroProgram::standard();
    let mut sequencer = enter_feed(program);

    run(&mut sequencer, program.phase_ticks(Phase::Feed) - 1);
    assert_eq!(sequencer.phase(), Phase::Feed);
    assert_eq!(sequencer.state().repeats_remaining, 1);

    run(&mut sequencer, 1);
    assert_eq!(sequencer.phase(), Phase::AfterFeed);
}

#[test]
fn loop_returns_to_buy_and_never_to_sync() {
    let program = MacroProgram::standard();
    let loop_ticks = program.phase_ticks(Phase::Buy)
        + program.phase_ticks(Phase::Feed)
        + program.phase_ticks(Phase::AfterFeed);
    let mut sequencer = Sequencer::with_observer(program, CycleLog::<64>::new());

    run(&mut sequencer, program.phase_ticks(Phase::Sync));
    for _ in 0..2 {
        run(&mut sequencer, loop_ticks);
        assert_eq!(sequencer.phase(), Phase::Buy);
        assert_eq!(sequencer.state().step_index, 0);
        assert_eq!(sequencer.state().repeats_remaining, DEFAULT_FEED_REPEATS);
    }

    let log = sequencer.observer();
    assert_eq!(log.count_completed(Phase::Sync), 1);
    assert!(log.oldest_first().all(|event| event.next != Phase::Sync));
    // sync + 2 x (buy + 10 feed + after-feed)
    assert_eq!(log.recorded(), 1 + 2 * 12);
    assert_eq!(log.transitions(), 1 + 2 * 3);
}

#[test]
fn custom_repeat_count_is_honoured() {
    let program = MacroProgram::standard().with_feed_repeats(3).unwrap();
    let mut sequencer = enter_feed(program);
    assert_eq!(sequencer.state().repeats_remaining, 3);

    run(&mut sequencer, feed_item_script().ticks_per_pass() * 3);
    assert_eq!(sequencer.phase(), Phase::AfterFeed);
    assert_eq!(sequencer.state().repeats_remaining, 3);
}
