use super::model::{PassengerClass, PassengerRecord, PassengerTable, Sex};

pub fn passenger(
    id: u32,
    survived: bool,
    class: PassengerClass,
    sex: Sex,
    age: Option<f64>,
) -> PassengerRecord {
    PassengerRecord {
        id,
        survived,
        class,
        sex,
        age,
    }
}

/// Four passengers: two survivors (classes 1 and 2, one unknown age) and two
/// non-survivors (classes 1 and 3).
pub fn scenario_table() -> PassengerTable {
    use PassengerClass::*;
    PassengerTable::from_records(vec![
        passenger(1, true, First, Sex::Female, Some(30.0)),
        passenger(2, true, Second, Sex::Male, None),
        passenger(3, false, First, Sex::Male, Some(40.0)),
        passenger(4, false, Third, Sex::Female, Some(20.0)),
    ])
}
