use super::wide::wide;

use ph_core::{Sid, SystemError, SystemResult};

use std::ptr::{null, null_mut};

use windows_sys::Win32::Foundation::GetLastError;
use windows_sys::Win32::NetworkManagement::NetManagement::{
    NERR_Success, NERR_UserNotFound, NetApiBufferFree, NetUserDel, NetUserGetInfo,
};
use windows_sys::Win32::UI::Shell::DeleteProfileW;

pub(super) fn account_exists(username: &str) -> SystemResult<bool> {
    let name = wide(username);
    let mut buffer: *mut u8 = null_mut();

    // SAFETY: `name` is NUL-terminated; a null server means the local machine.
    let status = unsafe { NetUserGetInfo(null(), name.as_ptr(), 0, &mut buffer) };

    if !buffer.is_null() {
        // SAFETY: the buffer was allocated by NetUserGetInfo.
        unsafe {
            NetApiBufferFree(buffer.cast());
        }
    }

    match status {
        NERR_Success => Ok(true),
        NERR_UserNotFound => Ok(false),
        code => Err(SystemError::os(format!("NetUserGetInfo({username})"), code)),
    }
}

pub(super) fn delete_account(username: &str) -> SystemResult<()> {
    let name = wide(username);

    // SAFETY: `name` is NUL-terminated; a null server means the local machine.
    let status = unsafe { NetUserDel(null(), name.as_ptr()) };

    match status {
        NERR_Success | NERR_UserNotFound => Ok(()),
        code => Err(SystemError::os(format!("NetUserDel({username})"), code)),
    }
}

pub(super) fn delete_profile(identity: &Sid) -> SystemResult<()> {
    let sid = wide(identity.as_str());

    // SAFETY: `sid` is NUL-terminated; null path and computer are allowed.
    let ok = unsafe { DeleteProfileW(sid.as_ptr(), null(), null()) };

    if ok == 0 {
        // SAFETY: reads the calling thread's last error.
        let code = unsafe { GetLastError() };
        return Err(SystemError::os(format!("DeleteProfileW({identity})"), code));
    }

    Ok(())
}
