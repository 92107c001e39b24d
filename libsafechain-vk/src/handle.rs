use std::fmt;
use std::os::raw::c_void;

use super::*;

/// Owning handle to a cloned `pNext` chain. The chain is released when the
/// handle drops. A handle may be moved to another thread; shared access
/// needs outside synchronization since releasing mutates the chain.
pub struct SafeChain(*mut c_void);

impl SafeChain {
    /// Deep-copies `head`, which must be null or point at a live,
    /// well-formed chain for the duration of the call.
    pub unsafe fn clone_from(head: *const c_void) -> Result<Self, ChainError> {
        chain::clone_pnext_chain(head).map(SafeChain)
    }

    pub fn head(&self) -> *const c_void {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_null()
    }
}

impl Drop for SafeChain {
    fn drop(&mut self) {
        unsafe { chain::free_pnext_chain(self.0) };
    }
}

unsafe impl Send for SafeChain {}

impl fmt::Debug for SafeChain {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "SafeChain({:p})", self.0)
    }
}

/// Owning deep copy of an instance create-info, for retaining the
/// application's instance parameters past `vkCreateInstance`.
pub struct SafeInstanceCreateInfo(*mut VkInstanceCreateInfo);

impl SafeInstanceCreateInfo {
    pub unsafe fn clone_from(info: *const VkInstanceCreateInfo) -> Result<Self, ChainError> {
        chain::clone_instance_create_info(info).map(SafeInstanceCreateInfo)
    }

    pub fn as_ptr(&self) -> *const VkInstanceCreateInfo {
        self.0
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

impl Drop for SafeInstanceCreateInfo {
    fn drop(&mut self) {
        unsafe { chain::free_instance_create_info(self.0) };
    }
}

unsafe impl Send for SafeInstanceCreateInfo {}

impl fmt::Debug for SafeInstanceCreateInfo {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "SafeInstanceCreateInfo({:p})", self.0)
    }
}

/// Owning deep copy of a debug-utils message, for logging it after the
/// callback has returned.
pub struct SafeDebugUtilsMessengerCallbackData(*mut VkDebugUtilsMessengerCallbackDataEXT);

impl SafeDebugUtilsMessengerCallbackData {
    pub unsafe fn clone_from(
        data: *const VkDebugUtilsMessengerCallbackDataEXT,
    ) -> Result<Self, ChainError> {
        chain::clone_debug_utils_callback_data(data).map(SafeDebugUtilsMessengerCallbackData)
    }

    pub fn as_ptr(&self) -> *const VkDebugUtilsMessengerCallbackDataEXT {
        self.0
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

impl Drop for SafeDebugUtilsMessengerCallbackData {
    fn drop(&mut self) {
        unsafe { chain::free_debug_utils_callback_data(self.0) };
    }
}

unsafe impl Send for SafeDebugUtilsMessengerCallbackData {}

impl fmt::Debug for SafeDebugUtilsMessengerCallbackData {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "SafeDebugUtilsMessengerCallbackData({:p})", self.0)
    }
}
