use crate::storage::{NewUrlRecord, UrlRecord};
use migration::entities::url_record;

pub fn model_to_record(model: url_record::Model) -> UrlRecord {
    UrlRecord {
        id: model.id,
        short_url: model.short_url,
        custom_alias: model.custom_alias,
        original_url: model.original_url,
        access_count: model.access_count.max(0) as u64,
        created_at: model.created_at,
        last_accessed_at: model.last_accessed_at,
        expires_at: model.expires_at,
    }
}

/// Build the insert model; `id` is left to the database
pub fn new_record_to_active_model(record: &NewUrlRecord) -> url_record::ActiveModel {
    use sea_orm::ActiveValue::*;

    url_record::ActiveModel {
        id: NotSet,
        short_url: Set(record.short_url.clone()),
        custom_alias: Set(record.custom_alias.clone()),
        original_url: Set(record.original_url.clone()),
        access_count: Set(0),
        created_at: Set(record.created_at),
        last_accessed_at: Set(None),
        expires_at: Set(record.expires_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use sea_orm::ActiveValue;

    #[test]
    fn test_model_to_record_clamps_negative_count() {
        let model = url_record::Model {
            id: 7,
            short_url: Some("abcdEFGH".to_string()),
            custom_alias: None,
            original_url: "https://example.com".to_string(),
            access_count: -3,
            created_at: Utc::now(),
            last_accessed_at: None,
            expires_at: None,
        };

        let record = model_to_record(model);
        assert_eq!(record.id, 7);
        assert_eq!(record.access_count, 0);
        assert_eq!(record.token(), "abcdEFGH");
    }

    #[test]
    fn test_active_model_leaves_id_to_database() {
        let now = Utc::now();
        let record = NewUrlRecord::aliased(
            "mylink",
            "https://example.com",
            now,
            Some(now + Duration::days(1)),
        );
        let active = new_record_to_active_model(&record);

        assert!(matches!(active.id, ActiveValue::NotSet));
        assert!(matches!(active.short_url, ActiveValue::Set(None)));
        assert!(matches!(active.access_count, ActiveValue::Set(0)));
        if let ActiveValue::Set(alias) = active.custom_alias {
            assert_eq!(alias.as_deref(), Some("mylink"));
        } else {
            panic!("custom_alias should be set");
        }
    }
}
