use super::*;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn fixed_and_scripted_deltas() {
    let mut fixed = FixedStepScheduler::per_frame(Fps::new(30, 1).unwrap());
    assert_eq!(fixed.next_delta(), Duration::from_nanos(33_333_333));

    let mut scripted = ScriptedScheduler::new([ms(5), ms(500)], ms(16));
    assert_eq!(scripted.next_delta(), ms(5));
    assert_eq!(scripted.next_delta(), ms(500));
    assert_eq!(scripted.next_delta(), ms(16));
    assert_eq!(scripted.next_delta(), ms(16));
}

#[test]
fn realtime_scheduler_waits_at_least_one_interval() {
    let mut s = RealtimeScheduler::new(Fps::new(100, 1).unwrap());
    let d = s.next_delta();
    assert!(d >= ms(10));
}

#[test]
fn start_rebases_the_realtime_clock() {
    let mut s = RealtimeScheduler::new(Fps::new(100, 1).unwrap());
    std::thread::sleep(ms(300));
    s.start();
    let d = s.next_delta();
    assert!(d >= ms(10));
    assert!(d < ms(250), "idle time before start leaked into the first delta: {d:?}");
}

#[test]
fn run_loop_starts_the_scheduler_before_the_first_step() {
    let mut s = RealtimeScheduler::new(Fps::new(100, 1).unwrap());
    std::thread::sleep(ms(300));
    let mut first = None;
    run_loop(&mut s, &CancelToken::new(), |d| {
        first = Some(d);
        Ok(LoopControl::Finish)
    })
    .unwrap();
    assert!(first.unwrap() < ms(250));
}

#[test]
fn run_loop_stops_on_finish() {
    let mut s = FixedStepScheduler::new(ms(10));
    let mut total = Duration::ZERO;
    let steps = run_loop(&mut s, &CancelToken::new(), |d| {
        total += d;
        Ok(if total >= ms(50) {
            LoopControl::Finish
        } else {
            LoopControl::Continue
        })
    })
    .unwrap();
    assert_eq!(steps, 5);
    assert_eq!(total, ms(50));
}

#[test]
fn run_loop_observes_cancellation_between_steps() {
    let cancel = CancelToken::new();
    let handle = cancel.clone();
    let mut s = FixedStepScheduler::new(ms(1));
    let mut seen = 0;
    let err = run_loop(&mut s, &cancel, |_| {
        seen += 1;
        if seen == 3 {
            handle.cancel();
        }
        Ok(LoopControl::Continue)
    })
    .unwrap_err();
    assert!(matches!(err, ReelError::Cancelled));
    assert_eq!(seen, 3);
}

#[test]
fn run_loop_propagates_step_errors() {
    let mut s = FixedStepScheduler::new(ms(1));
    let err = run_loop(&mut s, &CancelToken::new(), |_| {
        Err(ReelError::pipeline_msg("boom"))
    })
    .unwrap_err();
    assert!(matches!(err, ReelError::RenderPipeline(_)));
}

#[test]
fn pre_cancelled_token_runs_no_steps() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let mut s = FixedStepScheduler::new(ms(1));
    let mut ran = false;
    assert!(run_loop(&mut s, &cancel, |_| {
        ran = true;
        Ok(LoopControl::Finish)
    })
    .is_err());
    assert!(!ran);
}
