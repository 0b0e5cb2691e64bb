use std::path::Path;

use crate::{
    storage::{cursor::Cursor, pager::Pager},
    types::{
        PAGE_SIZE, RowNum,
        error::{Result, StorageError},
        row::{Row, RowLayout},
    },
};

/// Outcome of an insert. Running out of capacity is an ordinary result the
/// caller handles, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertResult {
    Inserted,
    TableFull,
}

/// The logical row store: an authoritative row count, the layout computed at
/// open time, and the pager that backs it.
pub struct Table {
    num_rows: RowNum,
    layout: RowLayout,
    pager: Pager,
}

impl Table {
    /// Opens the database file at `path`, creating it if absent.
    ///
    /// The row count is derived from the file length, not stored in the
    /// file: `file_length / row_size`. A partial trailing row, which this
    /// implementation never writes, would be silently dropped from the
    /// logical count.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let layout = RowLayout::new();
        let pager = Pager::open(path)?;
        let num_rows = (pager.file_length() / layout.row_size as u64) as RowNum;
        Ok(Self {
            num_rows,
            layout,
            pager,
        })
    }

    pub fn num_rows(&self) -> RowNum {
        self.num_rows
    }

    pub fn layout(&self) -> &RowLayout {
        &self.layout
    }

    pub fn is_full(&self) -> bool {
        self.num_rows >= self.layout.max_rows
    }

    /// A cursor at row 0, already at end-of-table when the table is empty.
    pub fn cursor_start(&mut self) -> Cursor<'_> {
        Cursor::at_start(self)
    }

    /// A cursor at row `num_rows`, the append slot.
    pub fn cursor_end(&mut self) -> Cursor<'_> {
        Cursor::at_end(self)
    }

    /// Appends `row` at the end of the table.
    ///
    /// Either the whole row is written and the count incremented, or (on an
    /// environment error) the count is left untouched; there is no partial
    /// state in between.
    pub fn insert(&mut self, row: &Row) -> Result<InsertResult> {
        if self.is_full() {
            return Ok(InsertResult::TableFull);
        }
        let layout = self.layout;
        let mut cursor = self.cursor_end();
        row.encode(&layout, cursor.value()?);
        self.num_rows += 1;
        Ok(InsertResult::Inserted)
    }

    /// A lazy full scan from row 0 to the last row, in insertion order.
    /// Calling it again restarts from the top; nothing is mutated.
    pub fn select(&mut self) -> Rows<'_> {
        Rows {
            cursor: self.cursor_start(),
        }
    }

    /// Resolves a row number to its byte slot via the pager:
    /// page `row_num / rows_per_page`, byte offset
    /// `(row_num % rows_per_page) * row_size` within it.
    pub(crate) fn row_slot(&mut self, row_num: RowNum) -> Result<&mut [u8]> {
        if row_num >= self.layout.max_rows {
            return Err(StorageError::RowOutOfBounds {
                row_num,
                max_rows: self.layout.max_rows,
            });
        }
        let page_num = row_num / self.layout.rows_per_page;
        let byte_offset = (row_num % self.layout.rows_per_page) * self.layout.row_size;
        let page = self.pager.get_page(page_num)?;
        Ok(&mut page[byte_offset..byte_offset + self.layout.row_size])
    }

    /// Flushes every cached page that holds written rows, then syncs and
    /// closes the file.
    ///
    /// Full pages flush all `PAGE_SIZE` bytes; the trailing partial page
    /// flushes only `remainder_rows * row_size`, so the file never carries
    /// bytes past the last valid row. Pages that were never cached were
    /// never written to and are skipped.
    pub fn close(mut self) -> Result<()> {
        let num_full_pages = self.num_rows / self.layout.rows_per_page;
        for page_num in 0..num_full_pages {
            if self.pager.is_cached(page_num) {
                self.pager.flush(page_num, PAGE_SIZE)?;
            }
        }

        let num_additional_rows = self.num_rows % self.layout.rows_per_page;
        if num_additional_rows > 0 && self.pager.is_cached(num_full_pages) {
            self.pager
                .flush(num_full_pages, num_additional_rows * self.layout.row_size)?;
        }

        self.pager.sync()
    }
}

/// Iterator over decoded rows, produced by [`Table::select`].
pub struct Rows<'a> {
    cursor: Cursor<'a>,
}

impl Iterator for Rows<'_> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.end_of_table() {
            return None;
        }
        let layout = *self.cursor.table_layout();
        let row = match self.cursor.value() {
            Ok(bytes) => Row::decode(&layout, bytes),
            Err(e) => return Some(Err(e)),
        };
        self.cursor.advance();
        Some(Ok(row))
    }
}
