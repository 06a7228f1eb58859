use std::ptr::{NonNull, null_mut};

use log::{debug, error};

use crate::util::{PAGE_SIZE, Size};

/// Anonymous, pre-faulted memory mapping used as a sweep buffer or probe page.
///
/// The mapping is released with `munmap` when the buffer is dropped.
#[derive(Debug)]
pub struct MeasurementBuffer {
    ptr: NonNull<u8>,
    len: usize,
}

impl MeasurementBuffer {
    /// Maps `size` bytes of private anonymous memory with `MAP_POPULATE`.
    ///
    /// Every page is written with `fill` so that no page is backed by the shared zero page
    /// when the sweep starts.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if `size` is zero or `mmap` fails.
    pub fn mmap(size: Size, fill: u8) -> std::io::Result<Self> {
        use libc::{MAP_ANONYMOUS, MAP_POPULATE, MAP_PRIVATE, PROT_READ, PROT_WRITE};

        let len = size.bytes();
        if len == 0 {
            return Err(std::io::Error::from(std::io::ErrorKind::InvalidInput));
        }
        let p = unsafe {
            libc::mmap(
                null_mut(),
                len,
                PROT_READ | PROT_WRITE,
                MAP_PRIVATE | MAP_ANONYMOUS | MAP_POPULATE,
                -1,
                0,
            )
        };
        if p == libc::MAP_FAILED {
            return Err(std::io::Error::last_os_error());
        }
        unsafe { libc::memset(p, fill as libc::c_int, len) };
        debug!("mapped {} at {:p}", size, p);
        let ptr = NonNull::new(p as *mut u8).ok_or(std::io::ErrorKind::OutOfMemory)?;
        Ok(Self { ptr, len })
    }

    /// Length of the mapping in bytes.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of whole pages in the mapping.
    pub fn page_count(&self) -> usize {
        self.len / PAGE_SIZE
    }

    /// Reference to the first byte of page `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of bounds.
    pub fn page(&self, idx: usize) -> &u8 {
        &self.as_slice()[idx * PAGE_SIZE]
    }

    /// The mapping as a byte slice.
    pub fn as_slice(&self) -> &[u8] {
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// The mapping as a mutable byte slice.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl Drop for MeasurementBuffer {
    fn drop(&mut self) {
        let r = unsafe { libc::munmap(self.ptr.as_ptr() as *mut libc::c_void, self.len) };
        if r != 0 {
            error!(
                "munmap({:p}, {}): {}",
                self.ptr,
                self.len,
                std::io::Error::last_os_error()
            );
        }
    }
}
