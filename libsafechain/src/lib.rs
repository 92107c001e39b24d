#![allow(non_snake_case)]

use safechain_vk::*;

// These are only shims, reexporting the scl functions with a vku prefix.
// IMPORTANT: These should only forward parameters to the scl implementation,
//            don't include any further logic.

#[no_mangle]
pub unsafe extern "C" fn vkuClonePNextChain(
    pNext: *const ::std::os::raw::c_void,
    ppChain: *mut *mut ::std::os::raw::c_void,
) -> VkResult {
    sclClonePNextChain(pNext, ppChain)
}

#[no_mangle]
pub unsafe extern "C" fn vkuFreePNextChain(pChain: *mut ::std::os::raw::c_void) {
    sclFreePNextChain(pChain)
}

#[no_mangle]
pub unsafe extern "C" fn vkuCloneInstanceCreateInfo(
    pCreateInfo: *const VkInstanceCreateInfo,
    ppCreateInfo: *mut *mut VkInstanceCreateInfo,
) -> VkResult {
    sclCloneInstanceCreateInfo(pCreateInfo, ppCreateInfo)
}

#[no_mangle]
pub unsafe extern "C" fn vkuFreeInstanceCreateInfo(pCreateInfo: *mut VkInstanceCreateInfo) {
    sclFreeInstanceCreateInfo(pCreateInfo)
}

#[no_mangle]
pub unsafe extern "C" fn vkuCloneDebugUtilsMessengerCallbackData(
    pCallbackData: *const VkDebugUtilsMessengerCallbackDataEXT,
    ppCallbackData: *mut *mut VkDebugUtilsMessengerCallbackDataEXT,
) -> VkResult {
    sclCloneDebugUtilsMessengerCallbackData(pCallbackData, ppCallbackData)
}

#[no_mangle]
pub unsafe extern "C" fn vkuFreeDebugUtilsMessengerCallbackData(
    pCallbackData: *mut VkDebugUtilsMessengerCallbackDataEXT,
) {
    sclFreeDebugUtilsMessengerCallbackData(pCallbackData)
}

#[no_mangle]
pub unsafe extern "C" fn vkuPostCallRecord(
    pFunctionName: *const ::std::os::raw::c_char,
    result: VkResult,
) -> VkBool32 {
    sclPostCallRecord(pFunctionName, result)
}

#[cfg(feature = "env_logger")]
#[no_mangle]
pub unsafe extern "C" fn vkuInitLogging() {
    sclInitLogging()
}
