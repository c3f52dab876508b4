#![allow(dead_code)]

use balanced_groups::model::entity::{Exchange, Gender, Level, Student};
use proptest::prelude::*;

pub fn student(name: &str, gender: &str, level: &str, exchange: &str) -> Student {
    Student::new(
        name,
        Gender::from_code(gender),
        Level::from_code(level),
        Exchange::from_code(exchange),
    )
}

/// A(f,master,false), B(m,bachelor,true), C(x,master,false), D(na,na,na)
pub fn four_students() -> Vec<Student> {
    vec![
        student("A", "f", "master", "false"),
        student("B", "m", "bachelor", "true"),
        student("C", "x", "master", "false"),
        student("D", "na", "na", "na"),
    ]
}

pub fn arb_gender() -> impl Strategy<Value = Gender> {
    prop_oneof![
        Just(Gender::Female),
        Just(Gender::Male),
        Just(Gender::Diverse),
        Just(Gender::Unknown),
    ]
}

pub fn arb_level() -> impl Strategy<Value = Level> {
    prop_oneof![Just(Level::Bachelor), Just(Level::Master), Just(Level::Unknown)]
}

pub fn arb_exchange() -> impl Strategy<Value = Exchange> {
    prop_oneof![Just(Exchange::Yes), Just(Exchange::No), Just(Exchange::Unknown)]
}

prop_compose! {
    /// Up to `max` students with unique names.
    pub fn arb_roster(max: usize)(
        attrs in proptest::collection::vec((arb_gender(), arb_level(), arb_exchange()), 0..max)
    ) -> Vec<Student> {
        attrs
            .into_iter()
            .enumerate()
            .map(|(i, (gender, level, exchange))| {
                Student::new(&format!("student {i}"), gender, level, exchange)
            })
            .collect()
    }
}
