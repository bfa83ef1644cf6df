//! Common test utilities for building flow graphs and sessions.
use onramp::prelude::*;

/// Two content steps wired in a line: `welcome -> finish -> end`.
#[allow(dead_code)]
pub fn two_step_flow() -> Flow {
    let mut flow = Flow::new("acme", "Two steps");
    flow.insert_node(FlowNode::new("welcome", "Welcome")).unwrap();
    flow.insert_node(FlowNode::new("finish", "All done")).unwrap();
    flow.connect("welcome", Target::Node("finish".to_string()))
        .unwrap();
    flow.connect("finish", Target::End).unwrap();
    flow
}

/// `welcome -> if-else on team_size -> team | solo -> end`.
#[allow(dead_code)]
pub fn if_else_flow() -> Flow {
    let mut flow = Flow::new("acme", "Team size check");
    flow.insert_node(
        FlowNode::new("welcome", "Welcome").with_content(ContentBlock::Input {
            key: "team_size".to_string(),
            label: "How big is your team?".to_string(),
        }),
    )
    .unwrap();
    flow.insert_node(FlowNode::new("team", "Invite your team"))
        .unwrap();
    flow.insert_node(FlowNode::new("solo", "Just you")).unwrap();
    flow.insert_block(LogicBlock::IfElse {
        id: "size-check".to_string(),
        condition: Condition::GreaterThan {
            key: "team_size".to_string(),
            value: 1.0,
        },
        when_true: Target::Node("team".to_string()),
        when_false: Target::Node("solo".to_string()),
    })
    .unwrap();
    flow.connect("welcome", Target::Block("size-check".to_string()))
        .unwrap();
    flow.connect("team", Target::End).unwrap();
    flow.connect("solo", Target::End).unwrap();
    flow
}

/// `welcome -> multi-path on choice {yes -> x, no -> y, default -> z} -> end`.
#[allow(dead_code)]
pub fn multi_path_flow(with_default: bool) -> Flow {
    let mut flow = Flow::new("acme", "Choice routing");
    flow.insert_node(FlowNode::new("welcome", "Welcome")).unwrap();
    flow.insert_node(FlowNode::new("x", "Path X")).unwrap();
    flow.insert_node(FlowNode::new("y", "Path Y")).unwrap();
    if with_default {
        flow.insert_node(FlowNode::new("z", "Path Z")).unwrap();
        flow.connect("z", Target::End).unwrap();
    }
    flow.insert_block(LogicBlock::MultiPath {
        id: "choice-split".to_string(),
        key: "choice".to_string(),
        cases: vec![
            CaseArm {
                value: "yes".to_string(),
                target: Target::Node("x".to_string()),
            },
            CaseArm {
                value: "no".to_string(),
                target: Target::Node("y".to_string()),
            },
        ],
        default: with_default.then(|| Target::Node("z".to_string())),
    })
    .unwrap();
    flow.connect("welcome", Target::Block("choice-split".to_string()))
        .unwrap();
    flow.connect("x", Target::End).unwrap();
    flow.connect("y", Target::End).unwrap();
    flow
}

/// `welcome -> score over q1/q2 -> low (0) | mid (5) | high (10) -> end`.
#[allow(dead_code)]
pub fn score_flow() -> Flow {
    let mut flow = Flow::new("acme", "Scored routing");
    flow.insert_node(FlowNode::new("welcome", "Welcome")).unwrap();
    flow.insert_node(FlowNode::new("low", "Starter track")).unwrap();
    flow.insert_node(FlowNode::new("mid", "Growth track")).unwrap();
    flow.insert_node(FlowNode::new("high", "Scale track")).unwrap();
    flow.insert_block(LogicBlock::ScoreThreshold {
        id: "fit-score".to_string(),
        weights: vec![
            ScoreWeight {
                key: "q1".to_string(),
                weight: 1.0,
            },
            ScoreWeight {
                key: "q2".to_string(),
                weight: 2.0,
            },
        ],
        buckets: vec![
            ScoreBucket {
                threshold: 0.0,
                target: Target::Node("low".to_string()),
            },
            ScoreBucket {
                threshold: 5.0,
                target: Target::Node("mid".to_string()),
            },
            ScoreBucket {
                threshold: 10.0,
                target: Target::Node("high".to_string()),
            },
        ],
    })
    .unwrap();
    flow.connect("welcome", Target::Block("fit-score".to_string()))
        .unwrap();
    flow.connect("low", Target::End).unwrap();
    flow.connect("mid", Target::End).unwrap();
    flow.connect("high", Target::End).unwrap();
    flow
}

/// `welcome -> a-b split (weight_a : weight_b) -> variant_a | variant_b`.
#[allow(dead_code)]
pub fn ab_flow(weight_a: u32, weight_b: u32) -> Flow {
    let mut flow = Flow::new("acme", "Split test");
    flow.insert_node(FlowNode::new("welcome", "Welcome")).unwrap();
    flow.insert_node(FlowNode::new("variant_a", "Variant A"))
        .unwrap();
    flow.insert_node(FlowNode::new("variant_b", "Variant B"))
        .unwrap();
    flow.insert_block(LogicBlock::AbTest {
        id: "landing-split".to_string(),
        arms: vec![
            SplitArm {
                weight: weight_a,
                target: Target::Node("variant_a".to_string()),
            },
            SplitArm {
                weight: weight_b,
                target: Target::Node("variant_b".to_string()),
            },
        ],
    })
    .unwrap();
    flow.connect("welcome", Target::Block("landing-split".to_string()))
        .unwrap();
    flow.connect("variant_a", Target::End).unwrap();
    flow.connect("variant_b", Target::End).unwrap();
    flow
}

/// A session with no answers yet.
#[allow(dead_code)]
pub fn empty_session() -> Session {
    Session::new("visitor-1")
}

/// A session carrying the given key/value answers.
#[allow(dead_code)]
pub fn session_with(answers: &[(&str, ResponseValue)]) -> Session {
    let mut session = Session::new("visitor-1");
    for (key, value) in answers {
        session.answer(*key, value.clone());
    }
    session
}
