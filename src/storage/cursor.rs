use crate::types::{RowNum, error::Result, row::RowLayout};

use crate::storage::table::Table;

/// A position within a table's rows, advancing in insertion order.
///
/// A cursor is a coordinate plus a derived end flag; it owns nothing and is
/// only valid while it borrows the table. Both insert (end cursor, pointing
/// at the append slot) and select (start cursor, walked to the end) go
/// through one of these.
pub struct Cursor<'a> {
    table: &'a mut Table,
    row_num: RowNum,
    end_of_table: bool,
}

impl<'a> Cursor<'a> {
    pub(crate) fn at_start(table: &'a mut Table) -> Self {
        let end_of_table = table.num_rows() == 0;
        Self {
            table,
            row_num: 0,
            end_of_table,
        }
    }

    pub(crate) fn at_end(table: &'a mut Table) -> Self {
        let row_num = table.num_rows();
        Self {
            table,
            row_num,
            end_of_table: true,
        }
    }

    pub fn row_num(&self) -> RowNum {
        self.row_num
    }

    pub fn table_layout(&self) -> &RowLayout {
        self.table.layout()
    }

    /// True once the cursor has passed the last valid row. Callers must stop
    /// decoding at that point; an end cursor still addresses the append slot
    /// through [`Cursor::value`].
    pub fn end_of_table(&self) -> bool {
        self.end_of_table
    }

    /// Moves the cursor one row forward, marking end-of-table once it
    /// reaches `num_rows`.
    pub fn advance(&mut self) {
        self.row_num += 1;
        if self.row_num >= self.table.num_rows() {
            self.end_of_table = true;
        }
    }

    /// The byte slot for the current row, resolved through the table's pager.
    pub fn value(&mut self) -> Result<&mut [u8]> {
        self.table.row_slot(self.row_num)
    }
}
