#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub pwhash: String,
    pub created_at: String,
}

/// A post joined with its author's display name.
#[derive(Debug, Clone)]
pub struct PostRow {
    pub id: i64,
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub img_url: String,
    pub date: String,
    pub author_id: i64,
    pub author_name: String,
}

#[derive(Debug, Clone)]
pub struct CommentRow {
    pub id: i64,
    pub body: String,
    pub author_id: i64,
    pub author_name: String,
    pub post_id: i64,
}

/// Field set for inserting a post.
#[derive(Debug)]
pub struct NewPost<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub body: &'a str,
    pub img_url: &'a str,
    pub date: &'a str,
    pub author_id: i64,
}

/// Field set for overwriting a post. The date is not editable, and
/// `author_id` is whoever submitted the edit.
#[derive(Debug)]
pub struct PostUpdate<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub body: &'a str,
    pub img_url: &'a str,
    pub author_id: i64,
}
