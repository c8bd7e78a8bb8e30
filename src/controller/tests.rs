use super::*;
use crate::highlight::HighlightMode;
use crate::session::PlaybackState;
use crate::speech::BoundaryKind;
use crate::surface::ScrollBlock;

const FOX: &str = "The quick brown fox";

fn controller(platform: PlatformClass) -> SpeechController {
    SpeechController::new(NarratorConfig::default(), platform)
}

fn ep(id: &str) -> EpisodeId {
    EpisodeId::from(id)
}

fn start(controller: &mut SpeechController, episode: &str, text: &str) -> Vec<Effect> {
    controller
        .reduce(Message::Start {
            episode: ep(episode),
            source: SourceRef(format!("{episode}-text")),
            text: text.to_string(),
        })
        .expect("start succeeds")
}

fn reduce(controller: &mut SpeechController, message: Message) -> Vec<Effect> {
    controller.reduce(message).expect("no error")
}

fn rendered_words(effects: &[Effect]) -> Vec<String> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Render { text, .. } => Some(text.word.clone()),
            _ => None,
        })
        .collect()
}

fn cursor(controller: &SpeechController, episode: &str) -> usize {
    controller
        .snapshot(&ep(episode))
        .expect("session exists")
        .word_cursor
}

fn state(controller: &SpeechController, episode: &str) -> PlaybackState {
    controller
        .snapshot(&ep(episode))
        .expect("session exists")
        .state
}

#[test]
fn blank_text_creates_no_session_and_no_effects() {
    let mut controller = controller(PlatformClass::Desktop);

    let err = controller
        .reduce(Message::Start {
            episode: ep("ep-1"),
            source: SourceRef::from("ep-1-text"),
            text: " \n\t ".to_string(),
        })
        .expect_err("blank text is rejected");

    assert_eq!(
        err,
        PlaybackError::EmptySourceText {
            episode: ep("ep-1")
        }
    );
    assert!(controller.snapshot(&ep("ep-1")).is_none());
    assert!(controller.active_episode().is_none());
}

#[test]
fn blank_text_leaves_running_session_untouched() {
    let mut controller = controller(PlatformClass::Desktop);
    start(&mut controller, "ep-1", FOX);

    let result = controller.reduce(Message::Start {
        episode: ep("ep-2"),
        source: SourceRef::from("ep-2-text"),
        text: "   ".to_string(),
    });

    assert!(result.is_err());
    assert_eq!(controller.active_episode(), Some(&ep("ep-1")));
    assert_eq!(state(&controller, "ep-1"), PlaybackState::Speaking);
}

#[test]
fn desktop_start_speaks_and_arms_grace_window() {
    let mut controller = controller(PlatformClass::Desktop);

    let effects = start(&mut controller, "ep-1", FOX);

    assert_eq!(
        effects,
        vec![
            Effect::CancelSpeech,
            Effect::Speak {
                utterance: UtteranceId(1),
                text: FOX.to_string(),
                voice: VoiceSettings::default(),
            },
            Effect::SetControls {
                episode: ep("ep-1"),
                controls: ControlVisibility::SPEAKING,
            },
            Effect::ArmGraceTimer {
                session: SessionId(1),
                delay: Duration::from_millis(250),
            },
        ]
    );
    let snapshot = controller.snapshot(&ep("ep-1")).expect("session");
    assert_eq!(snapshot.state, PlaybackState::Speaking);
    assert_eq!(snapshot.mode, HighlightMode::NativeBoundary);
    assert_eq!(snapshot.word_count, 4);
}

#[test]
fn handheld_start_goes_straight_to_the_word_timer() {
    let mut controller = controller(PlatformClass::Handheld);

    let effects = start(&mut controller, "ep-1", FOX);

    assert!(effects.contains(&Effect::ArmWordTimer {
        session: SessionId(1),
        period: Duration::from_millis(400),
    }));
    assert!(
        !effects
            .iter()
            .any(|effect| matches!(effect, Effect::ArmGraceTimer { .. }))
    );
    assert_eq!(
        controller.snapshot(&ep("ep-1")).map(|s| s.mode),
        Some(HighlightMode::FallbackTimer)
    );
}

#[test]
fn starting_another_episode_ends_the_first() {
    let mut controller = controller(PlatformClass::Desktop);
    start(&mut controller, "ep-a", FOX);

    let effects = start(&mut controller, "ep-b", "Second episode text");

    assert_eq!(
        &effects[..4],
        &[
            Effect::DisarmTimers {
                session: SessionId(1)
            },
            Effect::Restore {
                source: SourceRef::from("ep-a-text"),
                text: FOX.to_string(),
            },
            Effect::SetControls {
                episode: ep("ep-a"),
                controls: ControlVisibility::IDLE,
            },
            Effect::CancelSpeech,
        ]
    );
    assert!(controller.snapshot(&ep("ep-a")).is_none());
    assert_eq!(controller.active_episode(), Some(&ep("ep-b")));
}

#[test]
fn native_boundary_marks_word_at_offset() {
    let mut controller = controller(PlatformClass::Desktop);
    start(&mut controller, "ep-1", FOX);

    let effects = reduce(
        &mut controller,
        Message::Speech(SpeechEvent::Boundary {
            utterance: UtteranceId(1),
            kind: BoundaryKind::Word,
            char_index: 4,
        }),
    );

    assert_eq!(
        effects,
        vec![
            Effect::Render {
                source: SourceRef::from("ep-1-text"),
                text: HighlightedText {
                    before: "The ".to_string(),
                    word: "quick".to_string(),
                    after: " brown fox".to_string(),
                },
            },
            Effect::ScrollToMarker {
                source: SourceRef::from("ep-1-text"),
                options: ScrollOptions {
                    smooth: true,
                    block: ScrollBlock::Center,
                },
            },
        ]
    );

    // A boundary arrived, so the grace window keeps native tracking.
    let effects = reduce(&mut controller, Message::GraceElapsed(SessionId(1)));
    assert!(effects.is_empty());
    assert_eq!(
        controller.snapshot(&ep("ep-1")).map(|s| s.mode),
        Some(HighlightMode::NativeBoundary)
    );
}

#[test]
fn sentence_boundaries_are_ignored() {
    let mut controller = controller(PlatformClass::Desktop);
    start(&mut controller, "ep-1", FOX);

    let effects = reduce(
        &mut controller,
        Message::Speech(SpeechEvent::Boundary {
            utterance: UtteranceId(1),
            kind: BoundaryKind::Sentence,
            char_index: 0,
        }),
    );

    assert!(effects.is_empty());
    let effects = reduce(&mut controller, Message::GraceElapsed(SessionId(1)));
    assert!(matches!(effects.as_slice(), [Effect::ArmWordTimer { .. }]));
}

#[test]
fn silent_grace_window_falls_back_to_timer() {
    let mut controller = controller(PlatformClass::Desktop);
    start(&mut controller, "ep-1", FOX);

    let effects = reduce(&mut controller, Message::GraceElapsed(SessionId(1)));

    assert_eq!(
        effects,
        vec![Effect::ArmWordTimer {
            session: SessionId(1),
            period: Duration::from_millis(400),
        }]
    );
    assert_eq!(
        controller.snapshot(&ep("ep-1")).map(|s| s.mode),
        Some(HighlightMode::FallbackTimer)
    );

    let late = reduce(
        &mut controller,
        Message::Speech(SpeechEvent::Boundary {
            utterance: UtteranceId(1),
            kind: BoundaryKind::Word,
            char_index: 4,
        }),
    );
    assert!(late.is_empty());
}

#[test]
fn fallback_ticks_step_one_word_at_a_time() {
    let mut controller = controller(PlatformClass::Handheld);
    start(&mut controller, "ep-1", FOX);

    let first = reduce(&mut controller, Message::WordTick(SessionId(1)));
    assert_eq!(rendered_words(&first), vec!["The"]);
    assert_eq!(cursor(&controller, "ep-1"), 1);

    let second = reduce(&mut controller, Message::WordTick(SessionId(1)));
    assert_eq!(rendered_words(&second), vec!["quick"]);
    let Some(Effect::Render { text, .. }) = second.first() else {
        panic!("expected a render, got {second:?}");
    };
    assert_eq!(text.before, "The ");
    assert_eq!(cursor(&controller, "ep-1"), 2);
}

#[test]
fn last_tick_disarms_the_word_timer() {
    let mut controller = controller(PlatformClass::Handheld);
    start(&mut controller, "ep-1", "one two");

    reduce(&mut controller, Message::WordTick(SessionId(1)));
    let last = reduce(&mut controller, Message::WordTick(SessionId(1)));

    assert_eq!(rendered_words(&last), vec!["two"]);
    assert_eq!(
        last.last(),
        Some(&Effect::DisarmWordTimer {
            session: SessionId(1)
        })
    );
    assert_eq!(cursor(&controller, "ep-1"), 2);

    // A tick already queued before the disarm changes nothing.
    let extra = reduce(&mut controller, Message::WordTick(SessionId(1)));
    assert!(extra.is_empty());
    assert_eq!(cursor(&controller, "ep-1"), 2);
    assert_eq!(state(&controller, "ep-1"), PlaybackState::Speaking);
}

#[test]
fn handheld_pause_and_resume_continue_from_the_paused_word() {
    let mut controller = controller(PlatformClass::Handheld);
    start(&mut controller, "ep-1", FOX);
    reduce(&mut controller, Message::WordTick(SessionId(1)));
    reduce(&mut controller, Message::WordTick(SessionId(1)));

    let paused = reduce(&mut controller, Message::Pause(ep("ep-1")));
    assert_eq!(
        paused,
        vec![
            Effect::CancelSpeech,
            Effect::DisarmTimers {
                session: SessionId(1)
            },
            Effect::SetControls {
                episode: ep("ep-1"),
                controls: ControlVisibility::PAUSED,
            },
        ]
    );
    assert_eq!(state(&controller, "ep-1"), PlaybackState::Paused);
    assert_eq!(cursor(&controller, "ep-1"), 2);

    let resumed = reduce(&mut controller, Message::Resume(ep("ep-1")));
    assert_eq!(
        resumed,
        vec![
            Effect::Speak {
                utterance: UtteranceId(2),
                text: "brown fox".to_string(),
                voice: VoiceSettings::default(),
            },
            Effect::ArmWordTimer {
                session: SessionId(1),
                period: Duration::from_millis(400),
            },
            Effect::SetControls {
                episode: ep("ep-1"),
                controls: ControlVisibility::SPEAKING,
            },
        ]
    );

    let next = reduce(&mut controller, Message::WordTick(SessionId(1)));
    assert_eq!(rendered_words(&next), vec!["brown"]);
    assert_eq!(cursor(&controller, "ep-1"), 3);
}

#[test]
fn cancellation_callbacks_after_handheld_pause_are_ignored() {
    let mut controller = controller(PlatformClass::Handheld);
    start(&mut controller, "ep-1", FOX);
    reduce(&mut controller, Message::Pause(ep("ep-1")));

    let effects = reduce(
        &mut controller,
        Message::Speech(SpeechEvent::Ended {
            utterance: UtteranceId(1),
        }),
    );

    assert!(effects.is_empty());
    assert_eq!(state(&controller, "ep-1"), PlaybackState::Paused);
}

#[test]
fn resume_with_nothing_left_reports_no_resumable_content() {
    let mut controller = controller(PlatformClass::Handheld);
    start(&mut controller, "ep-1", "one two");
    reduce(&mut controller, Message::WordTick(SessionId(1)));
    reduce(&mut controller, Message::WordTick(SessionId(1)));
    reduce(&mut controller, Message::Pause(ep("ep-1")));

    let err = controller
        .reduce(Message::Resume(ep("ep-1")))
        .expect_err("nothing left to read");

    assert_eq!(
        err,
        PlaybackError::NoResumableContent {
            episode: ep("ep-1"),
            cursor: 2,
            word_count: 2,
        }
    );
    assert_eq!(state(&controller, "ep-1"), PlaybackState::Paused);
}

#[test]
fn desktop_pause_and_resume_use_the_platform() {
    let mut controller = controller(PlatformClass::Desktop);
    start(&mut controller, "ep-1", FOX);

    let paused = reduce(&mut controller, Message::Pause(ep("ep-1")));
    assert_eq!(paused[0], Effect::PauseSpeech);
    assert_eq!(state(&controller, "ep-1"), PlaybackState::Paused);

    let resumed = reduce(&mut controller, Message::Resume(ep("ep-1")));
    assert_eq!(resumed[0], Effect::ResumeSpeech);
    assert_eq!(state(&controller, "ep-1"), PlaybackState::Speaking);
}

#[test]
fn pause_and_resume_are_no_ops_in_the_wrong_state() {
    let mut controller = controller(PlatformClass::Desktop);
    assert!(reduce(&mut controller, Message::Pause(ep("ep-1"))).is_empty());
    assert!(reduce(&mut controller, Message::Resume(ep("ep-1"))).is_empty());

    start(&mut controller, "ep-1", FOX);
    assert!(reduce(&mut controller, Message::Resume(ep("ep-1"))).is_empty());
    assert_eq!(state(&controller, "ep-1"), PlaybackState::Speaking);

    reduce(&mut controller, Message::Pause(ep("ep-1")));
    assert!(reduce(&mut controller, Message::Pause(ep("ep-1"))).is_empty());
    assert_eq!(state(&controller, "ep-1"), PlaybackState::Paused);

    // Another episode's controls never act on this session.
    assert!(reduce(&mut controller, Message::Resume(ep("ep-2"))).is_empty());
    assert_eq!(state(&controller, "ep-1"), PlaybackState::Paused);
}

#[test]
fn paused_desktop_timer_skips_ticks_without_advancing() {
    let mut controller = controller(PlatformClass::Desktop);
    start(&mut controller, "ep-1", FOX);
    reduce(&mut controller, Message::GraceElapsed(SessionId(1)));
    reduce(&mut controller, Message::WordTick(SessionId(1)));
    reduce(&mut controller, Message::Pause(ep("ep-1")));

    let skipped = reduce(&mut controller, Message::WordTick(SessionId(1)));
    assert!(skipped.is_empty());
    assert_eq!(cursor(&controller, "ep-1"), 1);

    reduce(&mut controller, Message::Resume(ep("ep-1")));
    let next = reduce(&mut controller, Message::WordTick(SessionId(1)));
    assert_eq!(rendered_words(&next), vec!["quick"]);
}

#[test]
fn platform_pause_notifications_flip_controls_once() {
    let mut controller = controller(PlatformClass::Desktop);
    start(&mut controller, "ep-1", FOX);

    let effects = reduce(
        &mut controller,
        Message::Speech(SpeechEvent::Paused {
            utterance: UtteranceId(1),
        }),
    );
    assert_eq!(
        effects,
        vec![Effect::SetControls {
            episode: ep("ep-1"),
            controls: ControlVisibility::PAUSED,
        }]
    );

    // The echo of an explicit pause changes nothing further.
    let echo = reduce(
        &mut controller,
        Message::Speech(SpeechEvent::Paused {
            utterance: UtteranceId(1),
        }),
    );
    assert!(echo.is_empty());

    let resumed = reduce(
        &mut controller,
        Message::Speech(SpeechEvent::Resumed {
            utterance: UtteranceId(1),
        }),
    );
    assert_eq!(state(&controller, "ep-1"), PlaybackState::Speaking);
    assert_eq!(resumed.len(), 1);
}

#[test]
fn speech_end_tears_the_session_down() {
    let mut controller = controller(PlatformClass::Desktop);
    start(&mut controller, "ep-1", FOX);

    let effects = reduce(
        &mut controller,
        Message::Speech(SpeechEvent::Ended {
            utterance: UtteranceId(1),
        }),
    );

    assert_eq!(
        effects,
        vec![
            Effect::DisarmTimers {
                session: SessionId(1)
            },
            Effect::Restore {
                source: SourceRef::from("ep-1-text"),
                text: FOX.to_string(),
            },
            Effect::SetControls {
                episode: ep("ep-1"),
                controls: ControlVisibility::IDLE,
            },
        ]
    );
    assert!(controller.snapshot(&ep("ep-1")).is_none());
}

#[test]
fn speech_failure_tears_the_session_down() {
    let mut controller = controller(PlatformClass::Desktop);
    start(&mut controller, "ep-1", FOX);

    let effects = reduce(
        &mut controller,
        Message::Speech(SpeechEvent::Failed {
            utterance: UtteranceId(1),
            reason: "synthesis-failed".to_string(),
        }),
    );

    assert!(effects.iter().any(|effect| matches!(effect, Effect::Restore { .. })));
    assert!(controller.active_episode().is_none());
}

#[test]
fn stale_ticks_from_a_replaced_session_are_dropped() {
    let mut controller = controller(PlatformClass::Handheld);
    start(&mut controller, "ep-a", FOX);
    start(&mut controller, "ep-b", "Other words here");

    let effects = reduce(&mut controller, Message::WordTick(SessionId(1)));

    assert_eq!(
        effects,
        vec![Effect::DisarmTimers {
            session: SessionId(1)
        }]
    );
    assert_eq!(cursor(&controller, "ep-b"), 0);
}

#[test]
fn stop_for_another_episode_still_ends_the_active_one() {
    let mut controller = controller(PlatformClass::Desktop);
    start(&mut controller, "ep-a", FOX);

    let effects = reduce(&mut controller, Message::Stop(ep("ep-b")));

    assert_eq!(effects[0], Effect::CancelSpeech);
    assert!(effects.contains(&Effect::SetControls {
        episode: ep("ep-a"),
        controls: ControlVisibility::IDLE,
    }));
    assert_eq!(
        effects.last(),
        Some(&Effect::SetControls {
            episode: ep("ep-b"),
            controls: ControlVisibility::IDLE,
        })
    );
    assert!(controller.active_episode().is_none());
}

#[test]
fn stop_without_a_session_resets_controls() {
    let mut controller = controller(PlatformClass::Desktop);

    let effects = reduce(&mut controller, Message::Stop(ep("ep-1")));

    assert_eq!(
        effects,
        vec![
            Effect::CancelSpeech,
            Effect::SetControls {
                episode: ep("ep-1"),
                controls: ControlVisibility::IDLE,
            },
        ]
    );
}

#[test]
fn toggle_pause_flips_between_speaking_and_paused() {
    let mut controller = controller(PlatformClass::Desktop);
    assert!(reduce(&mut controller, Message::TogglePause(ep("ep-1"))).is_empty());

    start(&mut controller, "ep-1", FOX);
    reduce(&mut controller, Message::TogglePause(ep("ep-1")));
    assert_eq!(state(&controller, "ep-1"), PlaybackState::Paused);
    reduce(&mut controller, Message::TogglePause(ep("ep-1")));
    assert_eq!(state(&controller, "ep-1"), PlaybackState::Speaking);
}
