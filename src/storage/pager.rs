use std::{
    fs::{File, OpenOptions},
    io::{Read, Seek, SeekFrom, Write},
    path::Path,
};

use crate::types::{
    PAGE_SIZE, PageNum, TABLE_MAX_PAGES,
    error::{Result, StorageError},
};

/// Page cache over the backing file.
///
/// Pages are loaded lazily on first access and stay resident until the pager
/// is dropped: there is no eviction, the cache is bounded only by
/// `TABLE_MAX_PAGES`. Writing back to disk happens exclusively through
/// [`Pager::flush`]; nothing is written as a side effect of `get_page`.
pub struct Pager {
    file: File,
    file_length: u64,
    pages: Vec<Option<Vec<u8>>>,
}

impl Pager {
    /// Opens the backing file read/write, creating it if absent, and records
    /// the file length seen at open. That length is what later decides which
    /// pages have on-disk content to load.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        let file_length = file.metadata()?.len();
        let mut pages = Vec::with_capacity(TABLE_MAX_PAGES);
        pages.resize_with(TABLE_MAX_PAGES, || None);
        Ok(Self {
            file,
            file_length,
            pages,
        })
    }

    /// File length observed at open time, in bytes.
    pub fn file_length(&self) -> u64 {
        self.file_length
    }

    /// Whether the page slot has been materialized in memory.
    pub fn is_cached(&self, page_num: PageNum) -> bool {
        self.pages.get(page_num).is_some_and(|slot| slot.is_some())
    }

    /// Returns the in-memory buffer for `page_num`, loading it from disk on
    /// first access.
    ///
    /// On a miss the slot is zero-filled and then overlaid with whatever the
    /// file holds for that page, which may be less than a full page for the
    /// trailing partial page. Bytes past the on-disk content stay zero, so a
    /// never-written slot decodes as an absent row.
    pub fn get_page(&mut self, page_num: PageNum) -> Result<&mut [u8]> {
        if page_num >= TABLE_MAX_PAGES {
            return Err(StorageError::PageOutOfBounds {
                page_num,
                max: TABLE_MAX_PAGES,
            });
        }

        if self.pages[page_num].is_none() {
            let mut buffer = vec![0u8; PAGE_SIZE];

            // Pages on disk, counting a trailing partial page as one.
            let mut pages_on_disk = self.file_length / PAGE_SIZE as u64;
            if self.file_length % PAGE_SIZE as u64 != 0 {
                pages_on_disk += 1;
            }

            if (page_num as u64) < pages_on_disk {
                self.file
                    .seek(SeekFrom::Start(page_num as u64 * PAGE_SIZE as u64))?;
                read_up_to(&mut self.file, &mut buffer)?;
            }

            self.pages[page_num] = Some(buffer);
        }

        Ok(self.pages[page_num]
            .as_mut()
            .expect("page slot materialized above")
            .as_mut_slice())
    }

    /// Writes the first `byte_count` bytes of the cached page back to disk at
    /// `page_num * PAGE_SIZE`. Flushing a page that was never cached, or more
    /// bytes than a page holds, is a caller bug and reported as such.
    pub fn flush(&mut self, page_num: PageNum, byte_count: usize) -> Result<()> {
        if byte_count > PAGE_SIZE {
            return Err(StorageError::FlushTooLarge {
                page_num,
                byte_count,
                page_size: PAGE_SIZE,
            });
        }
        let page = self
            .pages
            .get(page_num)
            .and_then(|slot| slot.as_ref())
            .ok_or(StorageError::PageNotCached { page_num })?;

        self.file
            .seek(SeekFrom::Start(page_num as u64 * PAGE_SIZE as u64))?;
        self.file.write_all(&page[..byte_count])?;
        self.file.flush()?;
        Ok(())
    }

    /// Asks the OS to push all written data to the device. Used by
    /// `Table::close` after the final flush.
    pub fn sync(&mut self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }
}

/// Reads until `buffer` is full or the file ends. A short read at
/// end-of-file is expected for the last on-disk page and is not an error.
fn read_up_to(file: &mut File, buffer: &mut [u8]) -> Result<()> {
    let mut filled = 0;
    while filled < buffer.len() {
        let n = file.read(&mut buffer[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(())
}
