use CsvScrubber::cleaning_logic::clean_table;
use CsvScrubber::config::CleaningRequest;
use CsvScrubber::data_model::{CellValue, Column, Table};
use CsvScrubber::utils::spelling::DictionarySource;

fn text(values: &[Option<&str>]) -> Vec<CellValue> {
    values
        .iter()
        .map(|v| v.map_or(CellValue::Missing, CellValue::text))
        .collect()
}

fn name_table(values: &[Option<&str>]) -> Table {
    Table::from_columns(vec![Column::new("name", text(values))]).unwrap()
}

fn run(table: Table, request: &CleaningRequest) -> Table {
    clean_table(table, request, &DictionarySource::Embedded).unwrap()
}

fn request(pairs: &[(&str, &str)]) -> CleaningRequest {
    let mut request = CleaningRequest::for_column("name");
    for (k, v) in pairs {
        request.set_param(k, v).unwrap();
    }
    request
}

#[test]
fn test_no_flags_is_identity() {
    let table = Table::from_columns(vec![
        Column::new("id", vec![CellValue::Integer(1), CellValue::Integer(1), CellValue::Missing]),
        Column::new("name", text(&[Some("  a  "), Some("  a  "), None])),
    ])
    .unwrap();
    assert_eq!(run(table.clone(), &request(&[])), table);
    // disabled flags behave like absent ones
    assert_eq!(
        run(table.clone(), &request(&[("remove_spaces", "false"), ("uppercase", "0")])),
        table
    );
}

#[test]
fn test_whitespace_scenario() {
    let out = run(
        name_table(&[Some("William Shakespeare   ."), Some("John   Clinton"), Some("  Mike  ")]),
        &request(&[("remove_spaces", "true")]),
    );
    assert_eq!(
        out.column("name").unwrap().values,
        text(&[Some("William Shakespeare."), Some("John Clinton"), Some("Mike")])
    );
}

#[test]
fn test_remove_chars_scenario() {
    let out = run(
        name_table(&[Some("John Clinton"), Some("Michael Jackson"), Some("Mike")]),
        &request(&[("remove_chars", "i"), ("remove_chars", "o")]),
    );
    assert_eq!(
        out.column("name").unwrap().values,
        text(&[Some("Jhn Clntn"), Some("Mchael Jacksn"), Some("Mke")])
    );
}

#[test]
fn test_duplicate_row_scenario() {
    let table = Table::from_columns(vec![
        Column::new("id", [1, 2, 3, 2].iter().map(|&i| CellValue::Integer(i)).collect()),
        Column::new("name", text(&[Some("a"), Some("b"), Some("c"), Some("b")])),
    ])
    .unwrap();
    let out = run(table, &request(&[("remove_duplicate_rows", "true")]));
    assert_eq!(out.n_rows(), 3);
    assert_eq!(
        out.column("id").unwrap().values,
        vec![CellValue::Integer(1), CellValue::Integer(2), CellValue::Integer(3)]
    );
}

#[test]
fn test_negative_value_scenario() {
    let table = Table::from_columns(vec![Column::new(
        "value",
        vec![CellValue::Integer(10), CellValue::Integer(-5), CellValue::Integer(0)],
    )])
    .unwrap();
    let mut req = CleaningRequest::for_column("value");
    req.remove_negative = Some(true);
    let out = run(table, &req);
    assert_eq!(
        out.column("value").unwrap().values,
        vec![CellValue::Integer(10), CellValue::Missing, CellValue::Integer(0)]
    );
}

#[test]
fn test_remove_nulls_only_touches_missing() {
    let out = run(
        name_table(&[None, Some("x"), Some(""), None]),
        &request(&[("remove_nulls", "true")]),
    );
    assert_eq!(
        out.column("name").unwrap().values,
        text(&[Some(""), Some("x"), Some(""), Some("")])
    );
}

#[test]
fn test_uppercase_precedence() {
    let input = name_table(&[Some("Mixed Case"), Some("ärger"), None]);
    let both = run(input.clone(), &request(&[("uppercase", "true"), ("lowercase", "true")]));
    let upper_only = run(input, &request(&[("uppercase", "true")]));
    assert_eq!(both, upper_only);
    for cell in &upper_only.column("name").unwrap().values {
        if let CellValue::Text(s) = cell {
            assert_eq!(*s, s.to_uppercase());
        }
    }
}

#[test]
fn test_duplicate_rows_idempotent_through_pipeline() {
    let table = Table::from_columns(vec![
        Column::new("a", text(&[Some("x"), Some("x"), None, None, Some("y")])),
        Column::new("name", text(&[Some("1"), Some("1"), None, None, Some("1")])),
    ])
    .unwrap();
    let req = request(&[("remove_duplicate_rows", "true")]);
    let once = run(table, &req);
    let twice = run(once.clone(), &req);
    assert_eq!(once, twice);
    assert_eq!(once.n_rows(), 3);
}

#[test]
fn test_sort_null_ordering_documented() {
    let table = Table::from_columns(vec![
        Column::new("label", text(&[Some("a"), Some("b"), Some("c"), Some("d")])),
        Column::new(
            "v",
            vec![CellValue::Integer(2), CellValue::Missing, CellValue::Integer(1), CellValue::Integer(3)],
        ),
    ])
    .unwrap();
    let labels = |t: &Table| -> Vec<String> {
        t.column("label").unwrap().values.iter().map(|c| c.to_string()).collect()
    };

    let mut asc = CleaningRequest::for_column("v");
    asc.sort_ascending = Some(true);
    let mut desc = CleaningRequest::for_column("v");
    desc.sort_descending = Some(true);

    let sorted_asc = run(table.clone(), &asc);
    assert_eq!(labels(&sorted_asc), vec!["c", "a", "d", "b"]);
    let then_desc = run(sorted_asc, &desc);
    // missing stays last, so descending is not the reverse of ascending
    assert_eq!(labels(&then_desc), vec!["d", "a", "c", "b"]);

    // both flags: ascending first, descending last wins
    let mut both = CleaningRequest::for_column("v");
    both.sort_ascending = Some(true);
    both.sort_descending = Some(true);
    assert_eq!(labels(&run(table, &both)), vec!["d", "a", "c", "b"]);
}

#[test]
fn test_range_filter_property() {
    let values: Vec<f64> = vec![-3.0, -0.5, 0.0, 1.25, 4.0, 4.5, 100.0];
    let table = Table::from_columns(vec![Column::new(
        "v",
        values.iter().map(|&v| CellValue::Float(v)).collect(),
    )])
    .unwrap();
    let (min, max) = (-0.5, 4.0);
    let mut req = CleaningRequest::for_column("v");
    req.remove_out_of_range = Some(true);
    req.min_value = Some(min);
    req.max_value = Some(max);
    let out = run(table, &req);
    for (v, cell) in values.iter().zip(&out.column("v").unwrap().values) {
        if *v < min || *v > max {
            assert_eq!(*cell, CellValue::Missing, "value {}", v);
        } else {
            assert_eq!(*cell, CellValue::Float(*v));
        }
    }
}

#[test]
fn test_spelling_idempotent_for_known_words() {
    let req = request(&[("check_spelling", "true")]);
    let once = run(name_table(&[Some("the house"), Some("speling")]), &req);
    assert_eq!(
        once.column("name").unwrap().values,
        text(&[Some("the house"), Some("spelling")])
    );
    let twice = run(once.clone(), &req);
    assert_eq!(twice, once);
}

#[test]
fn test_spelling_leaves_everyday_sentences_alone() {
    let sentences = [
        Some("Mike and John walked their dogs to the house yesterday"),
        Some("Anna Smith quickly wrote a letter to her grandmother in London"),
        Some("William Shakespeare wrote plays about kings and queens"),
    ];
    let req = request(&[("check_spelling", "true")]);
    let once = run(
        name_table(&[
            sentences[0],
            sentences[1],
            sentences[2],
            Some("Michael spoke correctly about teh weather"),
        ]),
        &req,
    );
    let mut expected = sentences.to_vec();
    expected.push(Some("Michael spoke correctly about the weather"));
    assert_eq!(once.column("name").unwrap().values, text(&expected));

    let twice = run(once.clone(), &req);
    assert_eq!(twice, once);
}

#[test]
fn test_punctuation_runs_before_spelling() {
    let out = run(
        name_table(&[Some("teh, house!")]),
        &request(&[("check_spelling", "true"), ("remove_punctuation", "true")]),
    );
    assert_eq!(out.column("name").unwrap().values, text(&[Some("the house")]));
}

#[test]
fn test_replace_then_title_case_chain() {
    let out = run(
        name_table(&[Some("john_clinton"), Some("mike__smith")]),
        &request(&[
            ("title_case", "true"),
            ("replace_chars", "_"),
            ("replacement_string", " "),
            ("remove_spaces", "true"),
        ]),
    );
    // replacement runs after whitespace normalization, so double spaces survive
    assert_eq!(
        out.column("name").unwrap().values,
        text(&[Some("John Clinton"), Some("Mike  Smith")])
    );
}

#[test]
fn test_empty_rows_and_columns() {
    let table = Table::from_columns(vec![
        Column::new("name", text(&[Some("a"), None, Some("")])),
        Column::new("blank", text(&[None, None, None])),
    ])
    .unwrap();
    let out = run(
        table,
        &request(&[("remove_empty_rows", "true"), ("remove_empty_columns", "true")]),
    );
    assert_eq!(out.column_names(), vec!["name"]);
    assert_eq!(out.column("name").unwrap().values, text(&[Some("a"), Some("")]));
}

#[test]
fn test_html_url_and_vowel() {
    let out = run(
        name_table(&[Some("<b>नदी</b> www.x.in")]),
        &request(&[
            ("remove_html", "true"),
            ("remove_urls", "true"),
            ("remove_spaces", "true"),
            ("shorten_vowel", "true"),
            ("vowel_letter", "ी"),
        ]),
    );
    // remove_spaces runs first, so the trailing space left by the URL stays
    assert_eq!(out.column("name").unwrap().values, text(&[Some("नदि ")]));
}
