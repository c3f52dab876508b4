use balanced_groups::model::entity::{Exchange, Gender, Level};
use balanced_groups::roster::parse_roster;
use rstest::rstest;

#[rstest]
#[case("f", Gender::Female)]
#[case("W", Gender::Female)]
#[case("male", Gender::Male)]
#[case("d", Gender::Diverse)]
#[case("x", Gender::Diverse)]
#[case("na", Gender::Unknown)]
#[case("", Gender::Unknown)]
fn test_gender_codes(#[case] code: &str, #[case] expected: Gender) {
    let students = parse_roster(&format!("Someone, {code}, bachelor, yes"));
    assert_eq!(students[0].gender, expected);
    assert_eq!(students[0].level, Level::Bachelor);
    assert_eq!(students[0].exchange, Exchange::Yes);
}

#[test]
fn test_mixed_roster() {
    let text = "\
# course roster
Ada Lovelace, f, master, false
  Alan   Turing ,m,bachelor,true

Grace Hopper\tf\tMSc\tno
ada lovelace, m, bachelor, true
Anon, ?, phd, maybe, extra
";
    let students = parse_roster(text);
    let names: Vec<&str> = students.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Ada Lovelace", "Alan Turing", "Grace Hopper", "Anon"]);
    assert_eq!(students[0].gender, Gender::Female);
    assert_eq!(students[2].level, Level::Master);
    assert_eq!(students[2].exchange, Exchange::No);
    assert_eq!(students[3].gender, Gender::Unknown);
    assert_eq!(students[3].level, Level::Unknown);
    assert_eq!(students[3].exchange, Exchange::Unknown);
}
