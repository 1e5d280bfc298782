use evtree_core::event_tree::{FunctionalEvent, Sequence, StepRecord};
use evtree_parser::{EnumerateConfig, ParseConfig, error::ErrorCode, parse, tree_names};

const TWO_EVENTS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<opsa-mef>
  <define-event-tree name="TREE">
    <define-functional-event name="FE1"><label>A</label></define-functional-event>
    <define-functional-event name="FE2"><label>B</label></define-functional-event>
    <initial-state>
      <fork functional-event="FE1">
        <path state="Success">
          <fork functional-event="FE2">
            <path state="Success"><sequence name="SEQ-1"/></path>
            <path state="Failure"><sequence name="SEQ-2"/></path>
          </fork>
        </path>
        <path state="Failure"><sequence name="SEQ-3"/></path>
      </fork>
    </initial-state>
  </define-event-tree>
</opsa-mef>
"#;

fn steps(pairs: &[(&str, &str)]) -> Vec<StepRecord> {
    pairs
        .iter()
        .map(|(event, state)| StepRecord::new(*event, *state))
        .collect()
}

#[test]
fn test_two_event_tree() {
    let output = parse(TWO_EVENTS, "TREE", ParseConfig::default()).expect("Failed to parse");

    assert!(output.warnings().is_empty());

    let tree = output.tree();
    assert_eq!(
        tree.functional_events(),
        [FunctionalEvent::new("FE1", "A"), FunctionalEvent::new("FE2", "B")]
    );
    assert_eq!(
        tree.paths(),
        [
            Sequence::new(steps(&[("FE1", "Success"), ("FE2", "Success")]), "SEQ-1"),
            Sequence::new(steps(&[("FE1", "Success"), ("FE2", "Failure")]), "SEQ-2"),
            Sequence::new(steps(&[("FE1", "Failure")]), "SEQ-3"),
        ]
    );
}

#[test]
fn test_parse_is_deterministic() {
    let first = parse(TWO_EVENTS, "TREE", ParseConfig::default()).unwrap();
    let second = parse(TWO_EVENTS, "TREE", ParseConfig::default()).unwrap();

    assert_eq!(first.tree(), second.tree());
}

#[test]
fn test_tree_without_forks_keeps_header() {
    let source = r#"
        <opsa-mef>
          <define-event-tree name="EMPTY">
            <define-functional-event name="B"/>
            <define-functional-event name="A"/>
            <initial-state/>
          </define-event-tree>
        </opsa-mef>
    "#;

    let output = parse(source, "EMPTY", ParseConfig::default()).unwrap();

    assert!(output.tree().paths().is_empty());
    let names: Vec<_> = output
        .tree()
        .functional_events()
        .iter()
        .map(FunctionalEvent::name)
        .collect();
    assert_eq!(names, ["B", "A"]);
}

#[test]
fn test_missing_initial_state_warns() {
    let source = r#"<opsa-mef><define-event-tree name="T"/></opsa-mef>"#;

    let output = parse(source, "T", ParseConfig::default()).unwrap();

    assert!(output.tree().is_empty());
    assert_eq!(output.warnings().len(), 1);
    assert_eq!(output.warnings()[0].code(), Some(ErrorCode::E203));
}

#[test]
fn test_selects_named_tree_among_several() {
    let source = r#"
        <opsa-mef>
          <define-event-tree name="A">
            <initial-state>
              <fork functional-event="X"><path state="s"><sequence name="FROM-A"/></path></fork>
            </initial-state>
          </define-event-tree>
          <define-event-tree name="B">
            <initial-state>
              <fork functional-event="Y"><path state="s"><sequence name="FROM-B"/></path></fork>
            </initial-state>
          </define-event-tree>
        </opsa-mef>
    "#;

    let output = parse(source, "B", ParseConfig::default()).unwrap();

    assert_eq!(output.tree().paths().len(), 1);
    assert_eq!(output.tree().paths()[0].sequence(), "FROM-B");
}

#[test]
fn test_tree_not_found() {
    let err = parse(TWO_EVENTS, "tree", ParseConfig::default()).unwrap_err();

    assert_eq!(err.error_code(), Some(ErrorCode::E100));
    assert_eq!(err.diagnostics()[0].help(), Some("the document defines: `TREE`"));
}

#[test]
fn test_malformed_document() {
    let source = "<opsa-mef><define-event-tree name=\"T\"></opsa-mef>";

    let err = parse(source, "T", ParseConfig::default()).unwrap_err();

    assert_eq!(err.error_code(), Some(ErrorCode::E001));
}

#[test]
fn test_depth_limit_from_config() {
    let config = ParseConfig::new(EnumerateConfig::new(1), false);

    let err = parse(TWO_EVENTS, "TREE", config).unwrap_err();

    assert_eq!(err.error_code(), Some(ErrorCode::E200));
}

#[test]
fn test_over_nested_document_is_rejected_without_overflow() {
    let levels = 5000;
    let mut source = String::from(r#"<opsa-mef><define-event-tree name="T"><initial-state>"#);
    for _ in 0..levels {
        source.push_str(r#"<fork functional-event="FE"><path state="s">"#);
    }
    for _ in 0..levels {
        source.push_str("</path></fork>");
    }
    source.push_str("</initial-state></define-event-tree></opsa-mef>");

    let err = parse(&source, "T", ParseConfig::default()).unwrap_err();

    assert_eq!(err.error_code(), Some(ErrorCode::E200));
    let labels = err.diagnostics()[0].labels();
    assert_eq!(labels.len(), 1);
    let span = labels[0].span();
    assert!(source[span.start()..span.end()].starts_with("<path"));
}

#[test]
fn test_skipped_event_is_accepted_in_order() {
    let source = r#"
        <opsa-mef>
          <define-event-tree name="T">
            <define-functional-event name="FE1"/>
            <define-functional-event name="FE2"/>
            <define-functional-event name="FE3"/>
            <initial-state>
              <fork functional-event="FE1">
                <path state="Success">
                  <fork functional-event="FE3">
                    <path state="Failure"><sequence name="S"/></path>
                  </fork>
                </path>
              </fork>
            </initial-state>
          </define-event-tree>
        </opsa-mef>
    "#;
    let strict = ParseConfig::new(EnumerateConfig::default(), true);

    let output = parse(source, "T", strict).unwrap();

    assert!(output.warnings().is_empty());
}

#[test]
fn test_strict_order_rejects_reversed_forks() {
    let source = r#"
        <opsa-mef>
          <define-event-tree name="T">
            <define-functional-event name="FE1"/>
            <define-functional-event name="FE2"/>
            <initial-state>
              <fork functional-event="FE2">
                <path state="Success">
                  <fork functional-event="FE1">
                    <path state="Failure"><sequence name="S"/></path>
                  </fork>
                </path>
              </fork>
            </initial-state>
          </define-event-tree>
        </opsa-mef>
    "#;

    let relaxed = parse(source, "T", ParseConfig::default()).unwrap();
    assert_eq!(relaxed.warnings().len(), 1);
    assert_eq!(relaxed.warnings()[0].code(), Some(ErrorCode::E301));

    let strict = ParseConfig::new(EnumerateConfig::default(), true);
    let err = parse(source, "T", strict).unwrap_err();
    assert_eq!(err.error_code(), Some(ErrorCode::E301));
}

#[test]
fn test_tree_names() {
    let source = r#"
        <opsa-mef>
          <define-event-tree name="LOCA"/>
          <define-event-tree/>
          <define-event-tree name="SGTR"/>
        </opsa-mef>
    "#;

    assert_eq!(tree_names(source).unwrap(), ["LOCA", "SGTR"]);
    assert!(tree_names("not xml").is_err());
}
