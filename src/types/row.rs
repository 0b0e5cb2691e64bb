use serde::{Deserialize, Serialize};

use crate::types::{
    EMAIL_MAX_LEN, PAGE_SIZE, TABLE_MAX_PAGES, USERNAME_MAX_LEN,
    error::StorageError,
};

/*
 * Row layout on disk (fixed width, no padding, no length prefixes)
 * ┌──────────────┬────────────────────────┬──────────────────────┐
 * │  id (4, LE)  │  username (32, NUL-pad)│  email (255, NUL-pad)│
 * └──────────────┴────────────────────────┴──────────────────────┘
 * offset 0        offset 4                 offset 36
 */

/// Byte layout of a serialized row, plus the page/table geometry that
/// follows from it. Computed once at open time and carried by the table;
/// never a process-wide static.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    pub id_size: usize,
    pub username_size: usize,
    pub email_size: usize,
    pub id_offset: usize,
    pub username_offset: usize,
    pub email_offset: usize,
    pub row_size: usize,
    pub rows_per_page: usize,
    pub max_rows: usize,
}

impl RowLayout {
    pub fn new() -> Self {
        let id_size = size_of::<u32>();
        let username_size = USERNAME_MAX_LEN;
        let email_size = EMAIL_MAX_LEN;
        let id_offset = 0;
        let username_offset = id_offset + id_size;
        let email_offset = username_offset + username_size;
        let row_size = id_size + username_size + email_size;
        let rows_per_page = PAGE_SIZE / row_size;
        Self {
            id_size,
            username_size,
            email_size,
            id_offset,
            username_offset,
            email_offset,
            row_size,
            rows_per_page,
            max_rows: rows_per_page * TABLE_MAX_PAGES,
        }
    }
}

impl Default for RowLayout {
    fn default() -> Self {
        Self::new()
    }
}

/// One user record, the unit of insert and select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub id: u32,
    pub username: String,
    pub email: String,
}

impl Row {
    /// Builds a row, rejecting strings that do not fit their fixed field.
    pub fn new(
        id: u32,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, StorageError> {
        let username = username.into();
        let email = email.into();
        if username.len() > USERNAME_MAX_LEN {
            return Err(StorageError::FieldTooLong {
                field: "username",
                actual: username.len(),
                max: USERNAME_MAX_LEN,
            });
        }
        if email.len() > EMAIL_MAX_LEN {
            return Err(StorageError::FieldTooLong {
                field: "email",
                actual: email.len(),
                max: EMAIL_MAX_LEN,
            });
        }
        Ok(Self {
            id,
            username,
            email,
        })
    }

    /// Serialize this row into `dest` at the layout's fixed offsets.
    ///
    /// `dest` must cover at least `layout.row_size` bytes. The id is stored
    /// little-endian so the file reads the same on any architecture. String
    /// fields are written in full and NUL-padded, so stale bytes from a
    /// previous occupant of the slot never survive.
    pub fn encode(&self, layout: &RowLayout, dest: &mut [u8]) {
        let id_end = layout.id_offset + layout.id_size;
        dest[layout.id_offset..id_end].copy_from_slice(&self.id.to_le_bytes());
        write_padded(
            &mut dest[layout.username_offset..layout.username_offset + layout.username_size],
            self.username.as_bytes(),
        );
        write_padded(
            &mut dest[layout.email_offset..layout.email_offset + layout.email_size],
            self.email.as_bytes(),
        );
    }

    /// Deserialize a row from `src` at the layout's fixed offsets.
    ///
    /// A zero-filled source decodes to id 0 with empty strings, the defined
    /// shape of a never-written slot, not an error.
    pub fn decode(layout: &RowLayout, src: &[u8]) -> Self {
        let id_end = layout.id_offset + layout.id_size;
        let mut id_bytes = [0u8; 4];
        id_bytes.copy_from_slice(&src[layout.id_offset..id_end]);
        let id = u32::from_le_bytes(id_bytes);
        let username = read_padded(
            &src[layout.username_offset..layout.username_offset + layout.username_size],
        );
        let email =
            read_padded(&src[layout.email_offset..layout.email_offset + layout.email_size]);
        Self {
            id,
            username,
            email,
        }
    }
}

fn write_padded(field: &mut [u8], value: &[u8]) {
    field[..value.len()].copy_from_slice(value);
    field[value.len()..].fill(0);
}

fn read_padded(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}
