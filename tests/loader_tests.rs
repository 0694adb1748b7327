//! Integration tests for content file loading

use std::fs;
use study_path::errors::LoadError;
use study_path::loader;
use study_path::models::NodeStatus;
use tempfile::TempDir;

const BANK: &str = r#"
topic = "Advanced JavaScript Concepts"

[[questions]]
id = 1
prompt = "What is the difference between 'let' and 'var' in JavaScript?"
options = [
    "let has block scope, var has function scope",
    "let has function scope, var has block scope",
    "They are exactly the same",
    "let is hoisted, var is not hoisted",
]
correct_option = 0
explanation = "'let' has block scope while 'var' has function scope."

[[questions]]
id = 2
prompt = "Which method is used to add elements to the end of an array?"
options = ["unshift()", "push()", "pop()", "shift()"]
correct_option = 1
explanation = "push() adds one or more elements to the end of an array."
"#;

const ROADMAP: &str = r#"
id = "chemistry-basics"
title = "Chemistry Foundations"
description = "Essential chemistry concepts"
subject = "Chemistry"
progress = 20
last_updated = "2023-05-05"

[[nodes]]
id = "atomic-structure"
title = "Atomic Structure"
description = "Study of atoms and their components"
status = "completed"
quiz_score = 85
children = ["periodic-table"]

[[nodes]]
id = "periodic-table"
title = "Periodic Table & Trends"
description = "Elements and their properties"
status = "in-progress"
quiz_score = 62
children = ["bonding"]

[[nodes]]
id = "bonding"
title = "Chemical Bonding"
description = "How atoms form molecules"
status = "locked"
children = ["reactions"]

[[nodes]]
id = "reactions"
title = "Chemical Reactions"
description = "Types and balancing of reactions"
status = "locked"
children = ["organic"]

[[nodes]]
id = "organic"
title = "Organic Chemistry"
description = "Chemistry of carbon compounds"
status = "locked"
"#;

#[test]
fn load_question_bank_from_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("javascript.toml");
    fs::write(&path, BANK).expect("write bank");

    let bank = loader::load_question_bank(&path).expect("bank loads");

    assert_eq!(bank.topic, "Advanced JavaScript Concepts");
    assert_eq!(bank.len(), 2);
    assert_eq!(bank.questions()[0].options.len(), 4);
    assert!(bank.questions()[1].is_correct(1));
}

#[test]
fn load_roadmap_from_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("chemistry.toml");
    fs::write(&path, ROADMAP).expect("write roadmap");

    let roadmap = loader::load_roadmap(&path).expect("roadmap loads");

    assert_eq!(roadmap.id, "chemistry-basics");
    assert_eq!(roadmap.len(), 5);
    assert_eq!(roadmap.progress(), 20);
    assert_eq!(
        roadmap.node("atomic-structure").unwrap().status,
        NodeStatus::Completed
    );
    // 1 completed of 5 -> the stored 20% is consistent
    roadmap.validate().expect("stored progress matches");
}

#[test]
fn missing_file_reports_io_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("nope.toml");

    let err = loader::load_question_bank(&path).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("nope.toml"));
}

#[test]
fn stale_progress_loads_but_fails_validation() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("stale.toml");
    let stale = ROADMAP.replace("progress = 20", "progress = 90");
    fs::write(&path, stale).expect("write roadmap");

    let roadmap = loader::load_roadmap(&path).expect("structurally valid");
    assert!(matches!(
        roadmap.validate(),
        Err(study_path::errors::RoadmapError::ProgressMismatch {
            stored: 90,
            computed: 20
        })
    ));
}

#[test]
fn roadmap_file_with_duplicate_ids_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("dup.toml");
    let duplicated = format!(
        "{ROADMAP}\n[[nodes]]\nid = \"organic\"\ntitle = \"Organic Again\"\ndescription = \"\"\nstatus = \"locked\"\n"
    );
    fs::write(&path, duplicated).expect("write roadmap");

    let err = loader::load_roadmap(&path).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Roadmap(study_path::errors::RoadmapError::DuplicateId(_))
    ));
}
