use dashboard_protocol::{RecordId, UserProfile};

/// Looks up the profile for an explicit identity. Ids compare by their textual
/// form as well, so `"1001"` from an env var finds a numeric `1001` in the data.
pub fn find_user<'a>(users: &'a [UserProfile], id: &RecordId) -> Option<&'a UserProfile> {
    users.iter().find(|user| user.id == *id).or_else(|| {
        let wanted = id.to_string();
        users.iter().find(|user| user.id.to_string() == wanted)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn users() -> Vec<UserProfile> {
        serde_json::from_value(json!([
            { "id": 1000, "имя": "Анна" },
            { "id": 1001, "имя": "Иван", "фамилия": "Петров" },
            { "id": "ext-7", "firstName": "Guest" }
        ]))
        .expect("users")
    }

    #[test]
    fn finds_by_exact_id() {
        let users = users();
        let user = find_user(&users, &RecordId::Int(1001)).expect("user");
        assert_eq!(user.display_name(), "Иван Петров");
        let user = find_user(&users, &RecordId::from("ext-7")).expect("user");
        assert_eq!(user.first_name, "Guest");
    }

    #[test]
    fn textual_id_matches_numeric_record() {
        let users = users();
        let user = find_user(&users, &RecordId::Text("1000".to_string())).expect("user");
        assert_eq!(user.first_name, "Анна");
    }

    #[test]
    fn unknown_id_is_none() {
        assert!(find_user(&users(), &RecordId::Int(5)).is_none());
        assert!(find_user(&[], &RecordId::Int(1001)).is_none());
    }
}
