pub const SET_RESUME_POSITION: &str = "
    INSERT OR REPLACE INTO resume_positions (
        media_key,
        media_link,
        last_updated,
        last_timestamp_seconds
    )
    VALUES (?1, ?2, ?3, ?4)
";

pub const GET_RESUME_POSITION: &str = "
    SELECT media_link, last_updated, last_timestamp_seconds
    FROM resume_positions
    WHERE media_key = ?
";

pub const DELETE_RESUME_POSITION: &str = "
    DELETE FROM resume_positions
    WHERE media_key = ?
";

pub const PRUNE_RESUME_POSITIONS: &str = "
    DELETE FROM resume_positions
    WHERE last_updated < ?
";
