use super::{
    profile_list,
    wide::{from_wide_ptr, wide},
};

use ph_core::{SessionInfo, Sid, SystemError, SystemResult};

use std::ptr::{null, null_mut};
use std::str::FromStr;

use log::warn;
use windows_sys::Win32::Foundation::{GetLastError, LocalFree};
use windows_sys::Win32::Security::Authorization::ConvertSidToStringSidW;
use windows_sys::Win32::Security::{LookupAccountNameW, SID_NAME_USE};
use windows_sys::Win32::System::RemoteDesktop::{
    WTS_CURRENT_SERVER_HANDLE, WTS_INFO_CLASS, WTSDomainName, WTSFreeMemory,
    WTSGetActiveConsoleSessionId, WTSQuerySessionInformationW, WTSUserName,
};

const NO_CONSOLE_SESSION: u32 = u32::MAX;

/// The user of the active console session.
pub(super) fn current_session() -> SystemResult<SessionInfo> {
    // SAFETY: no arguments; returns a sentinel when there is no session.
    let session_id = unsafe { WTSGetActiveConsoleSessionId() };
    if session_id == NO_CONSOLE_SESSION {
        return Err(SystemError::invalid_data(
            "WTSGetActiveConsoleSessionId",
            "no active console session",
        ));
    }

    let username = query_session_string(session_id, WTSUserName)?;
    if username.is_empty() {
        return Err(SystemError::invalid_data(
            "WTSQuerySessionInformationW",
            format!("no user in session {session_id}"),
        ));
    }
    let domain = query_session_string(session_id, WTSDomainName)?;

    let account = if domain.is_empty() {
        username.clone()
    } else {
        format!(r"{domain}\{username}")
    };
    let identity = lookup_identity(&account)?;

    let profile_path = match profile_list::profile_path(&identity) {
        Ok(path) => path,
        Err(e) => {
            warn!("Cannot read profile path of {identity}: {e}");
            None
        }
    };

    Ok(SessionInfo {
        identity,
        username,
        profile_path,
    })
}

fn query_session_string(session_id: u32, class: WTS_INFO_CLASS) -> SystemResult<String> {
    let mut buffer: *mut u16 = null_mut();
    let mut bytes = 0u32;

    // SAFETY: out pointers are valid; the buffer is freed below.
    let ok = unsafe {
        WTSQuerySessionInformationW(
            WTS_CURRENT_SERVER_HANDLE,
            session_id,
            class,
            &mut buffer,
            &mut bytes,
        )
    };
    if ok == 0 {
        // SAFETY: reads the calling thread's last error.
        let code = unsafe { GetLastError() };
        return Err(SystemError::os("WTSQuerySessionInformationW", code));
    }

    // SAFETY: on success the buffer is a NUL-terminated string owned by WTS.
    let value = unsafe { from_wide_ptr(buffer) };
    // SAFETY: freed once, after the copy above.
    unsafe {
        WTSFreeMemory(buffer.cast());
    }

    Ok(value)
}

fn lookup_identity(account: &str) -> SystemResult<Sid> {
    let name = wide(account);
    let mut sid_len = 0u32;
    let mut domain_len = 0u32;
    let mut name_use: SID_NAME_USE = 0;

    // SAFETY: size query with null buffers; expected to fail with
    // ERROR_INSUFFICIENT_BUFFER and report the required sizes.
    unsafe {
        LookupAccountNameW(
            null(),
            name.as_ptr(),
            null_mut(),
            &mut sid_len,
            null_mut(),
            &mut domain_len,
            &mut name_use,
        );
    }
    if sid_len == 0 {
        // SAFETY: reads the calling thread's last error.
        let code = unsafe { GetLastError() };
        return Err(SystemError::os(format!("LookupAccountNameW({account})"), code));
    }

    let mut sid = vec![0u8; sid_len as usize];
    let mut domain = vec![0u16; domain_len as usize];

    // SAFETY: buffers are sized from the query above.
    let ok = unsafe {
        LookupAccountNameW(
            null(),
            name.as_ptr(),
            sid.as_mut_ptr().cast(),
            &mut sid_len,
            domain.as_mut_ptr(),
            &mut domain_len,
            &mut name_use,
        )
    };
    if ok == 0 {
        // SAFETY: reads the calling thread's last error.
        let code = unsafe { GetLastError() };
        return Err(SystemError::os(format!("LookupAccountNameW({account})"), code));
    }

    let mut string_sid: *mut u16 = null_mut();
    // SAFETY: `sid` holds a SID written by LookupAccountNameW.
    let ok = unsafe { ConvertSidToStringSidW(sid.as_mut_ptr().cast(), &mut string_sid) };
    if ok == 0 {
        // SAFETY: reads the calling thread's last error.
        let code = unsafe { GetLastError() };
        return Err(SystemError::os("ConvertSidToStringSidW", code));
    }

    // SAFETY: on success the string is NUL-terminated and owned by LocalAlloc.
    let value = unsafe { from_wide_ptr(string_sid) };
    // SAFETY: freed once, after the copy above.
    unsafe {
        LocalFree(string_sid.cast());
    }

    Sid::from_str(&value)
        .map_err(|e| SystemError::invalid_data("ConvertSidToStringSidW", e.to_string()))
}
