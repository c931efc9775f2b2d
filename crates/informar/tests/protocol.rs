//! Full-run protocol sequences for synthetic event streams.
//!
//! These drive a reporter over a `Vec<u8>` sink with a fake clock and
//! assert the exact emitted lines, byte for byte.

#![allow(clippy::unwrap_used)]

use informar::{
    CoverageSummary, Event, FakeClock, RunEndContext, RunStats, Suite, TeamcityReporter, TestCase,
    TestError,
};

fn drive(clock: &FakeClock, events: Vec<Event>) -> String {
    let mut reporter = TeamcityReporter::with_clock(Vec::new(), clock);
    for event in events {
        reporter.on_event(event).unwrap();
    }
    String::from_utf8(reporter.into_inner()).unwrap()
}

#[test]
fn single_passing_test_produces_expected_sequence() {
    let clock = FakeClock::new(1_000);
    let mut reporter = TeamcityReporter::with_clock(Vec::new(), &clock);

    reporter.on_event(Event::RunStart(RunStats::new(0))).unwrap();
    reporter.on_event(Event::SuiteStart(Suite::root(0))).unwrap();
    reporter
        .on_event(Event::SuiteStart(Suite::new(1, "Calculator")))
        .unwrap();
    reporter
        .on_event(Event::TestStart(TestCase::new("adds numbers")))
        .unwrap();
    clock.advance_ms(42);
    reporter
        .on_event(Event::TestPass(TestCase::new("adds numbers").with_duration_ms(42)))
        .unwrap();
    reporter
        .on_event(Event::TestEnd(TestCase::new("adds numbers").with_duration_ms(42)))
        .unwrap();
    reporter
        .on_event(Event::SuiteEnd(Suite::new(1, "Calculator")))
        .unwrap();
    reporter.on_event(Event::SuiteEnd(Suite::root(0))).unwrap();
    reporter
        .on_event(Event::RunEnd(
            RunEndContext::new(RunStats::new(42))
                .with_coverage(CoverageSummary::new(87.2, 218, 250)),
        ))
        .unwrap();

    let out = String::from_utf8(reporter.into_inner()).unwrap();
    let expected = "\
##teamcity[testSuiteStarted name='mocha.suite' duration='0']
##teamcity[testSuiteStarted name='Calculator']
##teamcity[testStarted name='adds numbers' captureStandardOutput='true']
  ✓ adds numbers (42ms)
##teamcity[testFinished name='adds numbers' duration='42']
##teamcity[testSuiteFinished name='Calculator' duration='42']
##teamcity[testSuiteFinished name='mocha.suite' duration='42']

##teamcity[message text='Code Coverage is 88%']
##teamcity[blockOpened name='Code Coverage Summary']
##teamcity[buildStatisticValue key='CodeCoverageB' value='88']
##teamcity[buildStatisticValue key='CodeCoverageAbsLCovered' value='218']
##teamcity[buildStatisticValue key='CodeCoverageAbsLTotal' value='250']
##teamcity[buildStatisticValue key='CodeCoverageL' value='88']
##teamcity[blockClosed name='Code Coverage Summary']
##teamcity[message text='CODE-COVERAGE CHECK PASSED' status='NORMAL']

";
    assert_eq!(out, expected);
}

#[test]
fn failing_test_emits_test_failed_before_test_finished() {
    let clock = FakeClock::new(0);
    let test = TestCase::new("divides by zero").with_duration_ms(3);
    let out = drive(
        &clock,
        vec![
            Event::TestStart(test.clone()),
            Event::TestFail {
                test: test.clone(),
                error: TestError::new("boom", "Error: boom\n    at calc.js:7:1"),
            },
            Event::TestEnd(test),
        ],
    );

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "##teamcity[testStarted name='divides by zero' captureStandardOutput='true']",
            "##teamcity[testFailed name='divides by zero' message='boom' \
             captureStandardOutput='true' details='Error: boom|n    at calc.js:7:1']",
            "##teamcity[testFinished name='divides by zero' duration='3']",
        ]
    );
}

#[test]
fn pending_test_emits_console_line_then_ignored_message() {
    let clock = FakeClock::new(0);
    let out = drive(
        &clock,
        vec![Event::TestPending(TestCase::new("supports emoji titles"))],
    );
    assert_eq!(
        out,
        "  - supports emoji titles\n\
         ##teamcity[testIgnored name='supports emoji titles' message='pending']\n"
    );
}

#[test]
fn missing_coverage_ends_the_report_after_one_error_line() {
    let clock = FakeClock::new(0);
    let out = drive(
        &clock,
        vec![
            Event::RunStart(RunStats::new(0)),
            Event::RunEnd(RunEndContext::new(RunStats::new(5))),
        ],
    );
    assert_eq!(
        out,
        "##teamcity[testSuiteStarted name='mocha.suite' duration='0']\n\
         ##teamcity[testSuiteFinished name='mocha.suite' duration='5']\n\
         \n\
         ##teamcity[message text='CODE-COVERAGE CHECK FAILED' \
         errorDetails='Error reading report file.' status='ERROR']\n"
    );
    assert!(!out.contains("blockOpened"));
    assert!(!out.contains("buildStatisticValue"));
}

#[test]
fn coverage_exactly_at_threshold_passes() {
    let clock = FakeClock::new(0);
    let out = drive(
        &clock,
        vec![Event::RunEnd(
            RunEndContext::new(RunStats::new(5))
                .with_coverage(CoverageSummary::new(75.0, 150, 200))
                .with_threshold(75),
        )],
    );
    assert!(out.contains("CODE-COVERAGE CHECK PASSED"));
    assert!(!out.contains("Insufficient code coverage."));
}

#[test]
fn special_characters_survive_escaping_end_to_end() {
    let clock = FakeClock::new(0);
    let title = "a|b\nc\rd[e]f\u{0085}g\u{2028}h\u{2029}i'j";
    let out = drive(&clock, vec![Event::TestStart(TestCase::new(title))]);
    assert_eq!(
        out,
        "##teamcity[testStarted name='a||b|nc|rd|[e|]f|xg|lh|pi|'j' \
         captureStandardOutput='true']\n"
    );
}
