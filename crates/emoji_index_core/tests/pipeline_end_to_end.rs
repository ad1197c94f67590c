use emoji_index_core::{
    build_index, run, to_json, write_output, CategoryId, CorrectionError, CorrectionFiles,
    Corrections, EmojiIndex, ExtraKeyword, Indent, KeywordMode, KeywordPolicy, PipelineConfig,
    PipelineError,
};
use std::error::Error;
use std::io::{self, Write};

const CHART: &str = r#"<html><body>
<table>
  <tr><th class="bighead"><a name="smileys_&_emotion">Smileys &amp; Emotion</a></th></tr>
  <tr><th class="mediumhead"><a name="face-smiling">face-smiling</a></th></tr>
  <tr><th>№</th><th>Code</th><th>Sample</th><th>CLDR Short Name</th><th>Other Keywords</th></tr>
  <tr><td>1</td><td>U+1F600</td><td><img alt="x"></td><td>grinning face</td><td>face | grin | grinning face</td></tr>
  <tr><th class="bighead">People &amp; Body</th></tr>
  <tr><th class="mediumhead">hand-fingers-closed</th></tr>
  <tr><td>2</td><td>U+1F44D</td><td></td><td>thumbs up</td><td>+1 | hand | thumb | up</td></tr>
  <tr><th class="mediumhead">hand-single-finger</th></tr>
  <tr><td>3</td><td>U+261D U+FE0F</td><td></td><td>index pointing up</td><td>finger | hand | index | point | up</td></tr>
  <tr><th class="bighead">Component</th></tr>
  <tr><th class="mediumhead">skin-tone</th></tr>
  <tr><td>4</td><td>U+1F3FB</td><td></td><td>light skin tone</td><td>skin tone | type 1–2</td></tr>
  <tr><th class="bighead">Symbols</th></tr>
  <tr><th class="mediumhead">heart</th></tr>
  <tr><td>5</td><td>U+2764</td><td></td><td>⊛ red heart</td><td>heart</td></tr>
</table>
</body></html>"#;

const MODIFIERS: &str = r#"<table>
  <tr><th>№</th><th>Code</th><th>Browser</th><th>Name</th></tr>
  <tr><td>1</td><td>U+1F44D U+1F3FB</td><td></td><td>thumbs up: light skin tone</td></tr>
  <tr><td>2</td><td>U+1F44D U+1F3FF</td><td></td><td>thumbs up: dark skin tone</td></tr>
  <tr><td>3</td><td>U+261D U+1F3FB</td><td></td><td>index pointing up: light skin tone</td></tr>
  <tr><td>4</td><td>U+1F9D1 U+1F3FB U+200D U+1F91D U+200D U+1F9D1 U+1F3FF</td><td></td><td>people holding hands</td></tr>
</table>"#;

fn default_index() -> EmojiIndex {
    build_index(CHART, MODIFIERS, &PipelineConfig::default())
        .expect("fixture charts should build")
}

#[test]
fn smileys_and_people_share_one_category() {
    let index = default_index();
    let order: Vec<CategoryId> = index.iter().map(|(category, _)| category).collect();
    assert_eq!(order, vec![CategoryId::SmileysPeople, CategoryId::Symbols]);

    let sequences: Vec<&str> = index
        .records(CategoryId::SmileysPeople)
        .iter()
        .map(|record| record.sequence.as_str())
        .collect();
    assert_eq!(sequences, vec!["\u{1F600}", "\u{1F44D}", "\u{261D}\u{FE0F}"]);
}

#[test]
fn component_rows_are_not_indexed() {
    let index = default_index();
    assert!(index.find("\u{1F3FB}").is_none());
    assert_eq!(index.len(), 4);
}

#[test]
fn grinning_face_keywords_are_flattened() {
    let index = default_index();
    let (_, record) = index.find("\u{1F600}").expect("record should be indexed");
    assert_eq!(record.keywords, vec!["face", "grin", "grinning", "smiling"]);
    assert!(record.skin_tone_variants.is_empty());
}

#[test]
fn skin_tone_variants_join_bare_and_selector_forms() {
    let index = default_index();

    let (_, thumbs) = index.find("\u{1F44D}").expect("record should be indexed");
    assert_eq!(
        thumbs.skin_tone_variants,
        vec!["\u{1F44D}\u{1F3FB}", "\u{1F44D}\u{1F3FF}"]
    );

    let (_, index_finger) = index
        .find("\u{261D}\u{FE0F}")
        .expect("record should be indexed");
    assert_eq!(index_finger.skin_tone_variants, vec!["\u{261D}\u{1F3FB}"]);
}

#[test]
fn new_marker_is_stripped_from_short_name() {
    let index = default_index();
    let (category, heart) = index.find("\u{2764}").expect("record should be indexed");
    assert_eq!(category, CategoryId::Symbols);
    assert_eq!(heart.keywords, vec!["heart", "red"]);
}

#[test]
fn phrase_policy_keeps_phrases() {
    let config = PipelineConfig {
        keyword_policy: KeywordPolicy {
            mode: KeywordMode::Phrases,
            dedup: true,
        },
        ..PipelineConfig::default()
    };
    let index = build_index(CHART, MODIFIERS, &config).expect("fixture charts should build");
    let (_, record) = index.find("\u{1F600}").expect("record should be indexed");
    assert!(record.keywords.contains(&"grinning face".to_string()));
    assert!(record.keywords.contains(&"face smiling".to_string()));
}

#[test]
fn corrections_run_in_order_and_tolerate_missing_targets() {
    let corrections = Corrections {
        force_variation_selector: vec!["\u{2764}".into()],
        extra_keywords: vec![
            ExtraKeyword {
                sequence: "\u{2764}\u{FE0F}".into(),
                keyword: "love".into(),
            },
            ExtraKeyword {
                sequence: "\u{1F47D}".into(),
                keyword: "alien".into(),
            },
        ],
        exclude: vec!["\u{261D}\u{FE0F}".into()],
    };

    let output = run(CHART, MODIFIERS, &corrections, &PipelineConfig::default())
        .expect("corrected pipeline should run");
    assert_eq!(output.report.selectors_forced, 1);
    assert_eq!(output.report.keywords_added, 1);
    assert_eq!(output.report.records_excluded, 1);
    assert_eq!(output.report.targets_missing, 1);

    let (_, heart) = output
        .index
        .find("\u{2764}\u{FE0F}")
        .expect("record should be indexed");
    assert_eq!(heart.keywords, vec!["heart", "love", "red"]);
    assert!(output.index.find("\u{261D}\u{FE0F}").is_none());
    assert_eq!(output.index.len(), 3);
}

#[test]
fn serialized_output_preserves_order_and_utf8() {
    let index = default_index();
    let json = to_json(&index, Indent::Compact).expect("index should serialize");

    assert!(json.starts_with("{\"0\":[[\"\u{1F600}\",[],[\"face\",\"grin\",\"grinning\",\"smiling\"]]"));
    assert!(json.contains("\"6\":[[\"\u{2764}\",[],[\"heart\",\"red\"]]]"));
    assert!(!json.contains("\\u"));

    let value: serde_json::Value =
        serde_json::from_str(&json).expect("output should be valid JSON");
    let people = value["0"].as_array().expect("category should be an array");
    assert_eq!(people.len(), 3);
    assert_eq!(people[1][1][0], "\u{1F44D}\u{1F3FB}");
}

#[test]
fn unknown_category_aborts_the_run() {
    let chart = r#"<table><tr><th class="bighead">Extras</th></tr></table>"#;
    let err = build_index(chart, MODIFIERS, &PipelineConfig::default())
        .expect_err("malformed chart must be rejected");
    assert!(matches!(err, PipelineError::Chart(_)));
    assert!(err.to_string().contains("Extras"));
}

#[test]
fn unreadable_correction_file_is_a_pipeline_error() {
    let dir = tempfile::TempDir::new().expect("temp dir should be created");
    let missing = dir.path().join("force.csv");
    let files = CorrectionFiles {
        force_variation_selector: Some(missing.as_path()),
        ..CorrectionFiles::default()
    };

    let err = files.load().expect_err("missing correction file must be fatal");
    assert!(matches!(
        err,
        PipelineError::Correction(CorrectionError::Io { .. })
    ));
    assert!(err.source().is_some());
    assert!(err.to_string().contains("force.csv"));
}

struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "disk full"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn failed_output_write_is_a_pipeline_error() {
    let output = run(
        CHART,
        MODIFIERS,
        &Corrections::default(),
        &PipelineConfig::default(),
    )
    .expect("pipeline should run");

    let err = write_output(&mut FailingWriter, &output, Indent::Compact)
        .expect_err("writer failure must surface");
    assert!(matches!(err, PipelineError::Serialize(_)));
    assert!(err.to_string().contains("disk full"));
}

#[test]
fn write_output_emits_newline_terminated_json() {
    let output = run(
        CHART,
        MODIFIERS,
        &Corrections::default(),
        &PipelineConfig::default(),
    )
    .expect("pipeline should run");

    let mut buffer = Vec::new();
    write_output(&mut buffer, &output, Indent::Pretty).expect("index should write");
    let text = String::from_utf8(buffer).expect("output should be UTF-8");
    assert!(text.ends_with("}\n"));
    assert!(text.contains("\n  \"0\": ["));
}
