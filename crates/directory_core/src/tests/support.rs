use std::rc::Rc;

use shared::domain::{UserId, UserRecord};

pub(crate) fn user(id: i64, name: &str, age: i64) -> UserRecord {
    UserRecord {
        id: UserId::from(id),
        name: name.to_string(),
        age,
        phone: format!("555-01{id:02}"),
        image: format!("{}.svg", name.to_ascii_lowercase()),
        phrase: format!("{name} says hi"),
        animal: "owl".to_string(),
    }
}

pub(crate) fn shared_user(id: i64, name: &str, age: i64) -> Rc<UserRecord> {
    Rc::new(user(id, name, age))
}

pub(crate) fn bob_and_ann() -> Vec<Rc<UserRecord>> {
    vec![shared_user(1, "Bob", 30), shared_user(2, "Ann", 25)]
}

pub(crate) fn names(users: &[Rc<UserRecord>]) -> Vec<&str> {
    users.iter().map(|user| user.name.as_str()).collect()
}
