use std::ffi::CStr;
use std::ptr;

use super::*;

#[inline]
pub extern "C" fn sclClonePNextChain(
    pNext: *const ::std::os::raw::c_void,
    ppChain: *mut *mut ::std::os::raw::c_void,
) -> VkResult {
    profiling::scope!("sclClonePNextChain");
    match unsafe { chain::clone_pnext_chain(pNext) } {
        Ok(head) => {
            unsafe { *ppChain = head };
            VkResult::VK_SUCCESS
        }
        Err(err) => {
            unsafe { *ppChain = ptr::null_mut() };
            conv::result_from_chain_error(err)
        }
    }
}

#[inline]
pub extern "C" fn sclFreePNextChain(pChain: *mut ::std::os::raw::c_void) {
    profiling::scope!("sclFreePNextChain");
    unsafe { chain::free_pnext_chain(pChain) }
}

#[inline]
pub extern "C" fn sclCloneInstanceCreateInfo(
    pCreateInfo: *const VkInstanceCreateInfo,
    ppCreateInfo: *mut *mut VkInstanceCreateInfo,
) -> VkResult {
    profiling::scope!("sclCloneInstanceCreateInfo");
    match unsafe { chain::clone_instance_create_info(pCreateInfo) } {
        Ok(info) => {
            unsafe { *ppCreateInfo = info };
            VkResult::VK_SUCCESS
        }
        Err(err) => {
            unsafe { *ppCreateInfo = ptr::null_mut() };
            conv::result_from_chain_error(err)
        }
    }
}

#[inline]
pub extern "C" fn sclFreeInstanceCreateInfo(pCreateInfo: *mut VkInstanceCreateInfo) {
    profiling::scope!("sclFreeInstanceCreateInfo");
    unsafe { chain::free_instance_create_info(pCreateInfo) }
}

#[inline]
pub extern "C" fn sclCloneDebugUtilsMessengerCallbackData(
    pCallbackData: *const VkDebugUtilsMessengerCallbackDataEXT,
    ppCallbackData: *mut *mut VkDebugUtilsMessengerCallbackDataEXT,
) -> VkResult {
    profiling::scope!("sclCloneDebugUtilsMessengerCallbackData");
    match unsafe { chain::clone_debug_utils_callback_data(pCallbackData) } {
        Ok(data) => {
            unsafe { *ppCallbackData = data };
            VkResult::VK_SUCCESS
        }
        Err(err) => {
            unsafe { *ppCallbackData = ptr::null_mut() };
            conv::result_from_chain_error(err)
        }
    }
}

#[inline]
pub extern "C" fn sclFreeDebugUtilsMessengerCallbackData(
    pCallbackData: *mut VkDebugUtilsMessengerCallbackDataEXT,
) {
    profiling::scope!("sclFreeDebugUtilsMessengerCallbackData");
    unsafe { chain::free_debug_utils_callback_data(pCallbackData) }
}

#[inline]
pub extern "C" fn sclPostCallRecord(
    pFunctionName: *const ::std::os::raw::c_char,
    result: VkResult,
) -> VkBool32 {
    if pFunctionName.is_null() {
        return VK_FALSE;
    }
    let name = match unsafe { CStr::from_ptr(pFunctionName) }.to_str() {
        Ok(name) => name,
        Err(_) => return VK_FALSE,
    };
    results::record_result(name, result) as VkBool32
}

#[cfg(feature = "env_logger")]
#[inline]
pub extern "C" fn sclInitLogging() {
    let _ = env_logger::try_init();
}
