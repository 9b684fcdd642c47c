use super::wide::{from_wide, wide};

use ph_core::{LiveProfile, Sid, SystemError, SystemResult};

use std::path::PathBuf;
use std::ptr::{null, null_mut};
use std::str::FromStr;

use log::{debug, warn};
use windows_sys::Win32::Foundation::{
    ERROR_FILE_NOT_FOUND, ERROR_MORE_DATA, ERROR_NO_MORE_ITEMS, ERROR_SUCCESS,
};
use windows_sys::Win32::System::Registry::{
    HKEY, HKEY_LOCAL_MACHINE, HKEY_USERS, KEY_READ, RRF_RT_REG_SZ, RegCloseKey, RegEnumKeyExW,
    RegGetValueW, RegOpenKeyExW,
};

const PROFILE_LIST_KEY: &str = r"SOFTWARE\Microsoft\Windows NT\CurrentVersion\ProfileList";
const PROFILE_IMAGE_PATH: &str = "ProfileImagePath";
const MAX_KEY_NAME_CHARS: usize = 256;
const MAX_VALUE_ATTEMPTS: usize = 3;

/// Open registry key, closed on drop.
struct RegKey(HKEY);

impl RegKey {
    /// `Ok(None)` when the key does not exist.
    fn open(parent: HKEY, subkey: &str) -> SystemResult<Option<Self>> {
        let name = wide(subkey);
        let mut handle: HKEY = null_mut();

        // SAFETY: `name` is NUL-terminated and outlives the call; `handle` is
        // a valid out pointer.
        let status = unsafe { RegOpenKeyExW(parent, name.as_ptr(), 0, KEY_READ, &mut handle) };

        match status {
            ERROR_SUCCESS => Ok(Some(Self(handle))),
            ERROR_FILE_NOT_FOUND => Ok(None),
            code => Err(SystemError::os(format!("RegOpenKeyExW({subkey})"), code)),
        }
    }

    fn subkey_names(&self) -> SystemResult<Vec<String>> {
        let mut names = Vec::new();
        let mut index = 0u32;

        loop {
            let mut buffer = [0u16; MAX_KEY_NAME_CHARS];
            let mut len = buffer.len() as u32;

            // SAFETY: `buffer` holds `len` characters; unused out pointers are null.
            let status = unsafe {
                RegEnumKeyExW(
                    self.0,
                    index,
                    buffer.as_mut_ptr(),
                    &mut len,
                    null(),
                    null_mut(),
                    null_mut(),
                    null_mut(),
                )
            };

            match status {
                ERROR_SUCCESS => names.push(String::from_utf16_lossy(&buffer[..len as usize])),
                ERROR_NO_MORE_ITEMS => break,
                code => return Err(SystemError::os("RegEnumKeyExW", code)),
            }
            index += 1;
        }

        Ok(names)
    }

    /// String value `value` of `subkey`, environment references expanded.
    fn string_value(&self, subkey: &str, value: &str) -> SystemResult<Option<String>> {
        let subkey_name = wide(subkey);
        let value_name = wide(value);
        let mut size_bytes: u32 = 0;

        for _ in 0..MAX_VALUE_ATTEMPTS {
            let mut buffer = vec![0u16; (size_bytes as usize).div_ceil(2)];
            let data = if buffer.is_empty() {
                null_mut()
            } else {
                buffer.as_mut_ptr().cast()
            };

            // SAFETY: names are NUL-terminated; `data` is null (size query) or
            // holds `size_bytes` bytes.
            let status = unsafe {
                RegGetValueW(
                    self.0,
                    subkey_name.as_ptr(),
                    value_name.as_ptr(),
                    RRF_RT_REG_SZ,
                    null_mut(),
                    data,
                    &mut size_bytes,
                )
            };

            match status {
                ERROR_SUCCESS if !buffer.is_empty() => return Ok(Some(from_wide(&buffer))),
                // Size query answered; retry with the reported size
                ERROR_SUCCESS | ERROR_MORE_DATA => continue,
                ERROR_FILE_NOT_FOUND => return Ok(None),
                code => return Err(SystemError::os(format!("RegGetValueW({value})"), code)),
            }
        }

        Err(SystemError::invalid_data(
            format!("RegGetValueW({value})"),
            "value kept growing while being read",
        ))
    }
}

impl Drop for RegKey {
    fn drop(&mut self) {
        // SAFETY: the handle came from RegOpenKeyExW and is closed once.
        unsafe {
            RegCloseKey(self.0);
        }
    }
}

pub(super) fn list_profiles() -> SystemResult<Vec<LiveProfile>> {
    let Some(list) = RegKey::open(HKEY_LOCAL_MACHINE, PROFILE_LIST_KEY)? else {
        return Err(SystemError::invalid_data(
            "profile enumeration",
            format!("{PROFILE_LIST_KEY} does not exist"),
        ));
    };

    let mut profiles = Vec::new();
    for name in list.subkey_names()? {
        // Backup keys such as `<sid>.bak` are not profiles
        let Ok(identity) = Sid::from_str(&name) else {
            debug!("Ignoring profile list entry {name}");
            continue;
        };

        let local_path = match list.string_value(&name, PROFILE_IMAGE_PATH) {
            Ok(Some(path)) => PathBuf::from(path),
            Ok(None) => {
                debug!("Profile {identity} has no {PROFILE_IMAGE_PATH}");
                continue;
            }
            Err(e) => {
                warn!("Cannot read profile path of {identity}: {e}");
                continue;
            }
        };

        let loaded = RegKey::open(HKEY_USERS, identity.as_str())?.is_some();

        profiles.push(LiveProfile {
            special: identity.is_service_identity(),
            identity,
            local_path,
            loaded,
        });
    }

    Ok(profiles)
}

pub(super) fn profile_path(identity: &Sid) -> SystemResult<Option<PathBuf>> {
    let Some(list) = RegKey::open(HKEY_LOCAL_MACHINE, PROFILE_LIST_KEY)? else {
        return Ok(None);
    };

    Ok(list
        .string_value(identity.as_str(), PROFILE_IMAGE_PATH)?
        .map(PathBuf::from))
}
