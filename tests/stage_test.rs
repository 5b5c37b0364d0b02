use eastwing::stage::{Personality, ProgressionSpeed, resolve_stage};

#[test]
fn fast_profile_turns_zero_six_and_seven() {
    assert_eq!(
        resolve_stage(0, ProgressionSpeed::Fast).personality,
        Personality::Mild
    );
    // last stage reached at 6 is serious; angry starts at 7
    assert_eq!(
        resolve_stage(6, ProgressionSpeed::Fast).personality,
        Personality::Serious
    );
    assert_eq!(
        resolve_stage(7, ProgressionSpeed::Fast).personality,
        Personality::Angry
    );
}

#[test]
fn fast_profile_thresholds() {
    let expected = [
        (0, "stage_10", Personality::Mild),
        (1, "stage_20", Personality::Mild),
        (2, "stage_20", Personality::Mild),
        (3, "stage_30", Personality::Medium),
        (5, "stage_40", Personality::Serious),
        (7, "stage_50", Personality::Angry),
        (11, "stage_50", Personality::Angry),
        (12, "stage_90", Personality::Tired),
        (500, "stage_90", Personality::Tired),
    ];
    for (turn, id, personality) in expected {
        let stage = resolve_stage(turn, ProgressionSpeed::Fast);
        assert_eq!(stage.id, id, "turn {turn}");
        assert_eq!(stage.personality, personality, "turn {turn}");
    }
}

#[test]
fn slow_profile_thresholds() {
    let expected = [
        (0, Personality::Mild),
        (4, Personality::Mild),
        (5, Personality::Upset),
        (8, Personality::Serious),
        (10, Personality::Angry),
        (14, Personality::Angry),
        (15, Personality::Tired),
    ];
    for (turn, personality) in expected {
        assert_eq!(
            resolve_stage(turn, ProgressionSpeed::Slow).personality,
            personality,
            "turn {turn}"
        );
    }
}

#[test]
fn stage_order_never_decreases_as_turns_grow() {
    for speed in ProgressionSpeed::ALL {
        let stages = speed.stages();
        let mut last_index = 0;
        for turn in 0..200 {
            let stage = resolve_stage(turn, speed);
            let index = stages.iter().position(|s| s == stage).unwrap();
            assert!(index >= last_index, "{speed} regressed at turn {turn}");
            last_index = index;
        }
    }
}

#[test]
fn resolution_is_repeatable() {
    for speed in ProgressionSpeed::ALL {
        for turn in 0..40 {
            assert_eq!(resolve_stage(turn, speed), resolve_stage(turn, speed));
        }
    }
}

#[test]
fn labels_parse_case_insensitively() {
    assert_eq!("FAST".parse::<ProgressionSpeed>(), Ok(ProgressionSpeed::Fast));
    assert_eq!(" Angry ".parse::<Personality>(), Ok(Personality::Angry));
    assert!("warp".parse::<ProgressionSpeed>().is_err());
    assert!("gleeful".parse::<Personality>().is_err());
}
