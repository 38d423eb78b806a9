use rusqlite::{Connection, OptionalExtension, params};

use crate::models::{CommentRow, NewPost, PostRow, PostUpdate, UserRow};
use crate::{Database, Result, StoreError, unique_violation};

impl Database {
    // -- Users --

    pub fn create_user(&self, name: &str, email: &str, pwhash: &str) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (name, email, pwhash) VALUES (?1, ?2, ?3)",
                (name, email, pwhash),
            )
            .map_err(|e| {
                if unique_violation(&e) {
                    StoreError::Duplicate("email")
                } else {
                    e.into()
                }
            })?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_email(conn, email))
    }

    // -- Posts --

    pub fn create_post(&self, post: &NewPost) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO blog_posts (title, subtitle, body, img_url, date, author_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    post.title,
                    post.subtitle,
                    post.body,
                    post.img_url,
                    post.date,
                    post.author_id
                ],
            )
            .map_err(|e| {
                if unique_violation(&e) {
                    StoreError::Duplicate("title")
                } else {
                    e.into()
                }
            })?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn all_posts(&self) -> Result<Vec<PostRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT p.id, p.title, p.subtitle, p.body, p.img_url, p.date,
                        p.author_id, u.name
                 FROM blog_posts p
                 JOIN users u ON p.author_id = u.id
                 ORDER BY p.id DESC",
            )?;

            let rows = stmt
                .query_map([], post_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    pub fn post_by_id(&self, id: i64) -> Result<Option<PostRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT p.id, p.title, p.subtitle, p.body, p.img_url, p.date,
                            p.author_id, u.name
                     FROM blog_posts p
                     JOIN users u ON p.author_id = u.id
                     WHERE p.id = ?1",
                    [id],
                    post_from_row,
                )
                .optional()?;

            Ok(row)
        })
    }

    pub fn update_post(&self, id: i64, patch: &PostUpdate) -> Result<()> {
        self.with_conn(|conn| {
            let changed = conn
                .execute(
                    "UPDATE blog_posts
                     SET title = ?1, subtitle = ?2, body = ?3, img_url = ?4, author_id = ?5
                     WHERE id = ?6",
                    params![
                        patch.title,
                        patch.subtitle,
                        patch.body,
                        patch.img_url,
                        patch.author_id,
                        id
                    ],
                )
                .map_err(|e| {
                    if unique_violation(&e) {
                        StoreError::Duplicate("title")
                    } else {
                        e.into()
                    }
                })?;

            if changed == 0 {
                return Err(StoreError::NotFound);
            }
            Ok(())
        })
    }

    /// Remove a post together with every comment referencing it, as one
    /// transaction: either the whole subtree goes or none of it does.
    pub fn delete_post(&self, id: i64) -> Result<()> {
        self.with_conn(|conn| {
            let tx = conn.unchecked_transaction()?;
            tx.execute("DELETE FROM comments WHERE post_id = ?1", [id])?;
            if tx.execute("DELETE FROM blog_posts WHERE id = ?1", [id])? == 0 {
                return Err(StoreError::NotFound);
            }
            tx.commit()?;
            Ok(())
        })
    }

    // -- Comments --

    pub fn create_comment(&self, body: &str, author_id: i64, post_id: i64) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO comments (body, author_id, post_id) VALUES (?1, ?2, ?3)",
                params![body, author_id, post_id],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn comments_for_post(&self, post_id: i64) -> Result<Vec<CommentRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT c.id, c.body, c.author_id, u.name, c.post_id
                 FROM comments c
                 JOIN users u ON c.author_id = u.id
                 WHERE c.post_id = ?1
                 ORDER BY c.id",
            )?;

            let rows = stmt
                .query_map([post_id], comment_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    pub fn comment_by_id(&self, id: i64) -> Result<Option<CommentRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT c.id, c.body, c.author_id, u.name, c.post_id
                     FROM comments c
                     JOIN users u ON c.author_id = u.id
                     WHERE c.id = ?1",
                    [id],
                    comment_from_row,
                )
                .optional()?;

            Ok(row)
        })
    }

    pub fn delete_comment(&self, id: i64) -> Result<()> {
        self.with_conn(|conn| {
            if conn.execute("DELETE FROM comments WHERE id = ?1", [id])? == 0 {
                return Err(StoreError::NotFound);
            }
            Ok(())
        })
    }
}

fn query_user_by_email(conn: &Connection, email: &str) -> Result<Option<UserRow>> {
    let mut stmt =
        conn.prepare("SELECT id, name, email, pwhash, created_at FROM users WHERE email = ?1")?;

    let row = stmt
        .query_row([email], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                pwhash: row.get(3)?,
                created_at: row.get(4)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn post_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PostRow> {
    Ok(PostRow {
        id: row.get(0)?,
        title: row.get(1)?,
        subtitle: row.get(2)?,
        body: row.get(3)?,
        img_url: row.get(4)?,
        date: row.get(5)?,
        author_id: row.get(6)?,
        author_name: row.get(7)?,
    })
}

fn comment_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CommentRow> {
    Ok(CommentRow {
        id: row.get(0)?,
        body: row.get(1)?,
        author_id: row.get(2)?,
        author_name: row.get(3)?,
        post_id: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_with_user() -> (Database, i64) {
        let db = Database::open_in_memory().unwrap();
        let id = db.create_user("Ada", "ada@example.com", "hash").unwrap();
        (db, id)
    }

    fn sample_post<'a>(author_id: i64) -> NewPost<'a> {
        NewPost {
            title: "First Post",
            subtitle: "A subtitle",
            body: "<p>Body</p>",
            img_url: "https://example.com/pic.png",
            date: "August 25, 2026",
            author_id,
        }
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let (db, _) = db_with_user();
        let err = db.create_user("Eve", "ada@example.com", "hash2").unwrap_err();
        assert!(matches!(err, StoreError::Duplicate("email")));
        // The first row is untouched.
        let user = db.user_by_email("ada@example.com").unwrap().unwrap();
        assert_eq!(user.name, "Ada");
    }

    #[test]
    fn all_posts_lists_newest_first() {
        let (db, uid) = db_with_user();
        for title in ["Older", "Newer"] {
            db.create_post(&NewPost {
                title,
                ..sample_post(uid)
            })
            .unwrap();
        }

        let posts = db.all_posts().unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "Newer");
        assert_eq!(posts[1].title, "Older");
    }

    #[test]
    fn duplicate_title_is_rejected() {
        let (db, uid) = db_with_user();
        db.create_post(&sample_post(uid)).unwrap();
        let err = db.create_post(&sample_post(uid)).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate("title")));
    }

    #[test]
    fn comment_requires_existing_post() {
        let (db, uid) = db_with_user();
        assert!(db.create_comment("hello", uid, 999).is_err());
    }

    #[test]
    fn delete_post_sweeps_its_comments() {
        let (db, uid) = db_with_user();
        let post_id = db.create_post(&sample_post(uid)).unwrap();
        db.create_comment("one", uid, post_id).unwrap();
        db.create_comment("two", uid, post_id).unwrap();

        db.delete_post(post_id).unwrap();

        assert!(db.post_by_id(post_id).unwrap().is_none());
        let orphans: i64 = db
            .with_conn(|conn| {
                conn.query_row(
                    "SELECT COUNT(*) FROM comments WHERE post_id = ?1",
                    [post_id],
                    |r| r.get(0),
                )
                .map_err(Into::into)
            })
            .unwrap();
        assert_eq!(orphans, 0);
    }

    #[test]
    fn delete_missing_post_is_not_found() {
        let (db, _) = db_with_user();
        assert!(matches!(db.delete_post(42), Err(StoreError::NotFound)));
    }

    #[test]
    fn update_post_reassigns_author() {
        let (db, uid) = db_with_user();
        let editor = db.create_user("Eve", "eve@example.com", "hash").unwrap();
        let post_id = db.create_post(&sample_post(uid)).unwrap();

        db.update_post(
            post_id,
            &PostUpdate {
                title: "Edited",
                subtitle: "New subtitle",
                body: "new body",
                img_url: "https://example.com/new.png",
                author_id: editor,
            },
        )
        .unwrap();

        let post = db.post_by_id(post_id).unwrap().unwrap();
        assert_eq!(post.title, "Edited");
        assert_eq!(post.author_id, editor);
        assert_eq!(post.author_name, "Eve");
        // Creation date survives the edit.
        assert_eq!(post.date, "August 25, 2026");
    }

    #[test]
    fn comments_join_author_names() {
        let (db, uid) = db_with_user();
        let post_id = db.create_post(&sample_post(uid)).unwrap();
        db.create_comment("hello", uid, post_id).unwrap();

        let comments = db.comments_for_post(post_id).unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].author_name, "Ada");
        assert_eq!(comments[0].post_id, post_id);
    }
}
