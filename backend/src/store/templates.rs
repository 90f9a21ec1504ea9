//! Template table operations.
//!
//! Keyword lists are stored as JSON text; the moderation state as its
//! stable string form. Both are decoded back in `row_to_template`, so a row
//! that fails to decode surfaces as a database error instead of silently
//! dropping out of result sets.

use common::model::template::{Sender, Template, TemplateState};
use rusqlite::types::Type;
use rusqlite::{params, Row};

use super::Db;

fn row_to_template(row: &Row<'_>) -> rusqlite::Result<Template> {
    let state_str: String = row.get(1)?;
    let state: TemplateState = state_str
        .parse()
        .map_err(|e: String| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, e.into()))?;

    let key_words_json: String = row.get(2)?;
    let key_words: Vec<String> = serde_json::from_str(&key_words_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;

    let sender_id: Option<i64> = row.get(3)?;

    Ok(Template {
        id: row.get(0)?,
        state,
        key_words,
        sender: Sender::from_user_id(sender_id),
    })
}

impl Db {
    /// Inserts a new template and returns its assigned id.
    pub fn insert_template(
        &self,
        key_words: &[String],
        sender: Sender,
        state: TemplateState,
    ) -> rusqlite::Result<i64> {
        let key_words_json = serde_json::to_string(key_words)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        let conn = self.conn();
        conn.execute(
            "INSERT INTO templates (state, key_words, sender_id) VALUES (?1, ?2, ?3)",
            params![state.as_str(), key_words_json, sender.user_id()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn get_template(&self, id: i64) -> rusqlite::Result<Option<Template>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare("SELECT id, state, key_words, sender_id FROM templates WHERE id = ?1")?;
        let mut rows = stmt.query_map(params![id], row_to_template)?;
        rows.next().transpose()
    }

    pub fn template_exists(&self, id: i64) -> rusqlite::Result<bool> {
        let conn = self.conn();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM templates WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Templates in a given state, newest first.
    pub fn list_by_state(&self, state: TemplateState) -> rusqlite::Result<Vec<Template>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, state, key_words, sender_id FROM templates
             WHERE state = ?1 ORDER BY id DESC",
        )?;
        let rows = stmt.query_map(params![state.as_str()], row_to_template)?;
        rows.collect()
    }

    /// Every template submitted by the given user, regardless of state,
    /// newest first.
    pub fn list_by_sender(&self, user_id: i64) -> rusqlite::Result<Vec<Template>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, state, key_words, sender_id FROM templates
             WHERE sender_id = ?1 ORDER BY id DESC",
        )?;
        let rows = stmt.query_map(params![user_id], row_to_template)?;
        rows.collect()
    }

    /// Sets the state of a template. Returns `false` when no such template
    /// exists. Re-applying the current state counts as a success.
    pub fn set_template_state(&self, id: i64, state: TemplateState) -> rusqlite::Result<bool> {
        let changed = self.conn().execute(
            "UPDATE templates SET state = ?1 WHERE id = ?2",
            params![state.as_str(), id],
        )?;
        Ok(changed > 0)
    }

    /// Removes a template together with any favorites links pointing at it,
    /// in one transaction.
    pub fn delete_template(&self, id: i64) -> rusqlite::Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM favorites WHERE template_id = ?1", params![id])?;
        tx.execute("DELETE FROM templates WHERE id = ?1", params![id])?;
        tx.commit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn insert_assigns_distinct_ids() {
        let db = Db::open_in_memory().unwrap();
        let a = db
            .insert_template(&words(&["cat"]), Sender::Anonymous, TemplateState::Unchecked)
            .unwrap();
        let b = db
            .insert_template(&words(&["dog"]), Sender::Anonymous, TemplateState::Unchecked)
            .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn get_round_trips_keywords_and_sender() {
        let db = Db::open_in_memory().unwrap();
        let id = db
            .insert_template(
                &words(&["cat", "dog"]),
                Sender::OwnedBy(3),
                TemplateState::NonForPublic,
            )
            .unwrap();

        let template = db.get_template(id).unwrap().unwrap();
        assert_eq!(template.id, id);
        assert_eq!(template.state, TemplateState::NonForPublic);
        assert_eq!(template.key_words, words(&["cat", "dog"]));
        assert_eq!(template.sender, Sender::OwnedBy(3));
    }

    #[test]
    fn get_missing_is_none() {
        let db = Db::open_in_memory().unwrap();
        assert!(db.get_template(42).unwrap().is_none());
    }

    #[test]
    fn list_by_state_is_newest_first() {
        let db = Db::open_in_memory().unwrap();
        let first = db
            .insert_template(&words(&["a"]), Sender::Anonymous, TemplateState::Approved)
            .unwrap();
        let second = db
            .insert_template(&words(&["b"]), Sender::Anonymous, TemplateState::Approved)
            .unwrap();
        db.insert_template(&words(&["c"]), Sender::Anonymous, TemplateState::Unchecked)
            .unwrap();

        let ids: Vec<i64> = db
            .list_by_state(TemplateState::Approved)
            .unwrap()
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[test]
    fn list_by_sender_ignores_state() {
        let db = Db::open_in_memory().unwrap();
        let own = db
            .insert_template(&words(&["a"]), Sender::OwnedBy(1), TemplateState::Rejected)
            .unwrap();
        db.insert_template(&words(&["b"]), Sender::OwnedBy(2), TemplateState::Approved)
            .unwrap();

        let ids: Vec<i64> = db
            .list_by_sender(1)
            .unwrap()
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![own]);
    }

    #[test]
    fn set_state_reports_missing_rows() {
        let db = Db::open_in_memory().unwrap();
        assert!(!db.set_template_state(9, TemplateState::Approved).unwrap());

        let id = db
            .insert_template(&words(&["a"]), Sender::Anonymous, TemplateState::Unchecked)
            .unwrap();
        assert!(db.set_template_state(id, TemplateState::Approved).unwrap());
        assert_eq!(
            db.get_template(id).unwrap().unwrap().state,
            TemplateState::Approved
        );
    }

    #[test]
    fn delete_removes_favorites_links() {
        let db = Db::open_in_memory().unwrap();
        let user = db.create_user("u", "h").unwrap().unwrap();
        let id = db
            .insert_template(&words(&["a"]), Sender::Anonymous, TemplateState::Unchecked)
            .unwrap();
        db.add_favorite(user, id).unwrap();

        db.delete_template(id).unwrap();
        assert!(db.get_template(id).unwrap().is_none());
        assert!(db.favorite_ids(user).unwrap().is_empty());
    }
}
