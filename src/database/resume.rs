use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::params;

use crate::{
    Database,
    database::queries::{
        DELETE_RESUME_POSITION, GET_RESUME_POSITION, PRUNE_RESUME_POSITIONS, SET_RESUME_POSITION,
    },
    domain::ResumePosition,
};

impl Database {
    pub fn save_resume_position(&mut self, key: &str, position: &ResumePosition) -> Result<()> {
        self.conn.execute(
            SET_RESUME_POSITION,
            params![
                key,
                position.media_link,
                position.last_updated.to_rfc3339_opts(SecondsFormat::Millis, true),
                position.last_timestamp_seconds
            ],
        )?;
        Ok(())
    }

    pub fn get_resume_position(&mut self, key: &str) -> Result<Option<ResumePosition>> {
        let row = self.conn.query_row(GET_RESUME_POSITION, params![key], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
            ))
        });

        match row {
            Ok((media_link, updated, seconds)) => Ok(Some(ResumePosition {
                media_link,
                last_updated: DateTime::parse_from_rfc3339(&updated)?.with_timezone(&Utc),
                last_timestamp_seconds: seconds,
            })),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Look a video up by its media id first, then by the raw link.
    pub fn find_resume_position(
        &mut self,
        media_id: Option<&str>,
        link: &str,
    ) -> Result<Option<ResumePosition>> {
        if let Some(id) = media_id {
            if let Some(pos) = self.get_resume_position(id)? {
                return Ok(Some(pos));
            }
        }
        self.get_resume_position(link)
    }

    pub fn delete_resume_position(&mut self, key: &str) -> Result<()> {
        self.conn.execute(DELETE_RESUME_POSITION, params![key])?;
        Ok(())
    }

    pub fn prune_resume_positions(&mut self, before: DateTime<Utc>) -> Result<usize> {
        let cutoff = before.to_rfc3339_opts(SecondsFormat::Millis, true);
        Ok(self.conn.execute(PRUNE_RESUME_POSITIONS, params![cutoff])?)
    }
}
