//! Deep copy and release of `pNext` extension structure chains.
//!
//! A layer that defers work past an entry point's return cannot keep
//! borrowing the application's input structures; it has to own a copy.
//! `clone_pnext_chain` walks a chain of tagged structures and builds an
//! independent deep copy: every owned array, string and nested structure
//! is reallocated, so the copy shares no storage with the original.
//! `free_pnext_chain` releases a copy exactly once.
//!
//! An unrecognized `sType` is a hard error. A pass-through would hand out
//! a chain containing links the library cannot free or guarantee the
//! lifetime of, so the clone is abandoned instead: everything already
//! copied is released and the offending tag is reported through
//! `ChainError::UnrecognizedKind`.

use smallvec::SmallVec;

use std::alloc::{self, Layout};
use std::ffi::CStr;
use std::os::raw::{c_char, c_void};
use std::ptr;
use std::sync::atomic::{AtomicIsize, Ordering};

use super::*;

/// Failure modes of a deep copy. On failure every allocation the copy had
/// already made is released before the error is returned.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChainError {
    OutOfHostMemory,
    UnrecognizedKind(u32),
}

// Every allocation this module makes is balanced against its free here.
// The counter is the leak oracle for the tests and cheap enough to keep
// in all builds.
static LIVE_ALLOCATIONS: AtomicIsize = AtomicIsize::new(0);

#[cfg(test)]
static ALLOCATION_BUDGET: AtomicIsize = AtomicIsize::new(isize::MAX);

/// Number of allocations currently owned by clones that have not been
/// released yet.
pub fn live_allocations() -> isize {
    LIVE_ALLOCATIONS.load(Ordering::SeqCst)
}

fn alloc_raw(layout: Layout) -> Result<*mut u8, ChainError> {
    #[cfg(test)]
    {
        if ALLOCATION_BUDGET.fetch_sub(1, Ordering::SeqCst) <= 0 {
            return Err(ChainError::OutOfHostMemory);
        }
    }
    let ptr = unsafe { alloc::alloc(layout) };
    if ptr.is_null() {
        return Err(ChainError::OutOfHostMemory);
    }
    LIVE_ALLOCATIONS.fetch_add(1, Ordering::SeqCst);
    Ok(ptr)
}

unsafe fn free_raw(ptr: *mut u8, layout: Layout) {
    LIVE_ALLOCATIONS.fetch_sub(1, Ordering::SeqCst);
    alloc::dealloc(ptr, layout);
}

fn alloc_value<T>(value: T) -> Result<*mut T, ChainError> {
    let ptr = alloc_raw(Layout::new::<T>())? as *mut T;
    unsafe { ptr::write(ptr, value) };
    Ok(ptr)
}

unsafe fn free_value<T>(ptr: *mut T) {
    free_raw(ptr as *mut u8, Layout::new::<T>());
}

unsafe fn free_array<T>(ptr: *mut T, count: usize) {
    if ptr.is_null() || count == 0 {
        return;
    }
    free_raw(ptr as *mut u8, Layout::array::<T>(count).unwrap());
}

// A clone owns its strings and never rewrites them; the allocation size is
// recomputed from the contents on free.
unsafe fn free_cstr(ptr: *mut c_char) {
    if ptr.is_null() {
        return;
    }
    let len = CStr::from_ptr(ptr).to_bytes_with_nul().len();
    free_raw(ptr as *mut u8, Layout::array::<c_char>(len).unwrap());
}

enum StagedAlloc {
    Block(*mut u8, Layout),
    Chain(*mut c_void),
}

/// Bookkeeping for links that need more than one allocation. Anything
/// staged is freed again if the link cannot be completed; `commit` hands
/// ownership over to the finished link.
struct Staged {
    allocs: SmallVec<[StagedAlloc; 8]>,
}

impl Staged {
    fn new() -> Self {
        Staged {
            allocs: SmallVec::new(),
        }
    }

    fn block(&mut self, layout: Layout) -> Result<*mut u8, ChainError> {
        let ptr = alloc_raw(layout)?;
        self.allocs.push(StagedAlloc::Block(ptr, layout));
        Ok(ptr)
    }

    fn array_uninit<T>(&mut self, count: usize) -> Result<*mut T, ChainError> {
        let layout = Layout::array::<T>(count).map_err(|_| ChainError::OutOfHostMemory)?;
        Ok(self.block(layout)? as *mut T)
    }

    unsafe fn array<T: Copy>(&mut self, src: *const T, count: usize) -> Result<*mut T, ChainError> {
        if src.is_null() || count == 0 {
            return Ok(ptr::null_mut());
        }
        let dst = self.array_uninit::<T>(count)?;
        ptr::copy_nonoverlapping(src, dst, count);
        Ok(dst)
    }

    unsafe fn bytes(
        &mut self,
        src: *const u8,
        size: usize,
        align: usize,
    ) -> Result<*mut u8, ChainError> {
        let layout =
            Layout::from_size_align(size, align).map_err(|_| ChainError::OutOfHostMemory)?;
        let dst = self.block(layout)?;
        ptr::copy_nonoverlapping(src, dst, size);
        Ok(dst)
    }

    unsafe fn cstr(&mut self, src: *const c_char) -> Result<*const c_char, ChainError> {
        if src.is_null() {
            return Ok(ptr::null());
        }
        let len = CStr::from_ptr(src).to_bytes_with_nul().len();
        let dst = self.block(Layout::array::<c_char>(len).unwrap())?;
        ptr::copy_nonoverlapping(src as *const u8, dst, len);
        Ok(dst as *const c_char)
    }

    unsafe fn value<T>(&mut self, value: T) -> Result<*mut T, ChainError> {
        let ptr = self.block(Layout::new::<T>())? as *mut T;
        ptr::write(ptr, value);
        Ok(ptr)
    }

    unsafe fn chain(&mut self, src: *const c_void) -> Result<*const c_void, ChainError> {
        let copy = clone_pnext_chain(src)?;
        if !copy.is_null() {
            self.allocs.push(StagedAlloc::Chain(copy));
        }
        Ok(copy as *const c_void)
    }

    fn commit(mut self) {
        self.allocs.clear();
    }
}

impl Drop for Staged {
    fn drop(&mut self) {
        for staged in self.allocs.drain(..).rev() {
            match staged {
                StagedAlloc::Block(ptr, layout) => unsafe { free_raw(ptr, layout) },
                StagedAlloc::Chain(head) => unsafe { free_pnext_chain(head) },
            }
        }
    }
}

// The tag is read as a raw u32 so that values outside `VkStructureType`
// stay representable while being rejected.
#[repr(C)]
struct RawLink {
    tag: u32,
    next: *const c_void,
}

unsafe fn chain_tag(link: *const c_void) -> u32 {
    (*(link as *const RawLink)).tag
}

unsafe fn chain_next(link: *const c_void) -> *const c_void {
    (*(link as *const RawLink)).next
}

/// Deep-copies a whole `pNext` chain. Returns the head of an owned chain
/// with the same structure types in the same order, or null for a null
/// input. The source must stay unmodified for the duration of the call.
pub unsafe fn clone_pnext_chain(head: *const c_void) -> Result<*mut c_void, ChainError> {
    let mut out: *mut VkBaseOutStructure = ptr::null_mut();
    let mut tail: *mut *mut VkBaseOutStructure = &mut out;
    let mut link = head;

    while !link.is_null() {
        let copy = match clone_link(link) {
            Ok(copy) => copy,
            Err(err) => {
                free_pnext_chain(out as *mut c_void);
                return Err(err);
            }
        };
        *tail = copy;
        tail = &mut (*copy).pNext;
        link = chain_next(link);
    }

    Ok(out as *mut c_void)
}

/// Releases a chain previously returned by `clone_pnext_chain`. Owned
/// payloads are freed before their link; a null head is a no-op. Must be
/// called at most once per clone.
pub unsafe fn free_pnext_chain(head: *mut c_void) {
    let mut link = head;
    while !link.is_null() {
        let next = chain_next(link) as *mut c_void;
        free_link(link);
        link = next;
    }
}

// Per-kind dispatch. Each arm copies the link's fixed fields, reallocates
// its owned payloads and leaves `pNext` null for the caller to stitch.
unsafe fn clone_link(link: *const c_void) -> Result<*mut VkBaseOutStructure, ChainError> {
    use VkStructureType::*;

    let tag = chain_tag(link);
    let stype = match conv::map_structure_type(tag) {
        Some(stype) => stype,
        None => {
            warn!("rejecting pNext chain with unrecognized sType {}", tag);
            return Err(ChainError::UnrecognizedKind(tag));
        }
    };

    let mut staged = Staged::new();
    let copy = match stype {
        VK_STRUCTURE_TYPE_PHYSICAL_DEVICE_FEATURES_2 => {
            let src = &*(link as *const VkPhysicalDeviceFeatures2);
            alloc_value(VkPhysicalDeviceFeatures2 {
                pNext: ptr::null_mut(),
                ..*src
            })? as *mut VkBaseOutStructure
        }
        VK_STRUCTURE_TYPE_DEVICE_GROUP_DEVICE_CREATE_INFO => {
            let src = &*(link as *const VkDeviceGroupDeviceCreateInfo);
            let devices = staged.array(src.pPhysicalDevices, src.physicalDeviceCount as usize)?;
            alloc_value(VkDeviceGroupDeviceCreateInfo {
                pNext: ptr::null(),
                pPhysicalDevices: devices,
                ..*src
            })? as *mut VkBaseOutStructure
        }
        VK_STRUCTURE_TYPE_DEBUG_UTILS_MESSENGER_CREATE_INFO_EXT => {
            // The callback and user-data pointers stay the caller's; the
            // API contract keeps them alive for the messenger's lifetime.
            let src = &*(link as *const VkDebugUtilsMessengerCreateInfoEXT);
            alloc_value(VkDebugUtilsMessengerCreateInfoEXT {
                pNext: ptr::null(),
                ..*src
            })? as *mut VkBaseOutStructure
        }
        VK_STRUCTURE_TYPE_VALIDATION_FEATURES_EXT => {
            let src = &*(link as *const VkValidationFeaturesEXT);
            let enabled = staged.array(
                src.pEnabledValidationFeatures,
                src.enabledValidationFeatureCount as usize,
            )?;
            let disabled = staged.array(
                src.pDisabledValidationFeatures,
                src.disabledValidationFeatureCount as usize,
            )?;
            alloc_value(VkValidationFeaturesEXT {
                pNext: ptr::null(),
                pEnabledValidationFeatures: enabled,
                pDisabledValidationFeatures: disabled,
                ..*src
            })? as *mut VkBaseOutStructure
        }
        VK_STRUCTURE_TYPE_DEBUG_UTILS_LABEL_EXT => {
            let src = &*(link as *const VkDebugUtilsLabelEXT);
            let name = staged.cstr(src.pLabelName)?;
            alloc_value(VkDebugUtilsLabelEXT {
                pNext: ptr::null(),
                pLabelName: name,
                ..*src
            })? as *mut VkBaseOutStructure
        }
        VK_STRUCTURE_TYPE_DEBUG_UTILS_OBJECT_NAME_INFO_EXT => {
            let src = &*(link as *const VkDebugUtilsObjectNameInfoEXT);
            let name = staged.cstr(src.pObjectName)?;
            alloc_value(VkDebugUtilsObjectNameInfoEXT {
                pNext: ptr::null(),
                pObjectName: name,
                ..*src
            })? as *mut VkBaseOutStructure
        }
        VK_STRUCTURE_TYPE_DEBUG_UTILS_MESSENGER_CALLBACK_DATA_EXT => {
            let src = &*(link as *const VkDebugUtilsMessengerCallbackDataEXT);
            let value = clone_callback_data_payload(src, &mut staged)?;
            alloc_value(value)? as *mut VkBaseOutStructure
        }
        VK_STRUCTURE_TYPE_LAYER_SETTINGS_CREATE_INFO_EXT => {
            let src = &*(link as *const VkLayerSettingsCreateInfoEXT);
            let settings = clone_layer_settings(src.pSettings, src.settingCount, &mut staged)?;
            alloc_value(VkLayerSettingsCreateInfoEXT {
                pNext: ptr::null(),
                pSettings: settings,
                ..*src
            })? as *mut VkBaseOutStructure
        }
        VK_STRUCTURE_TYPE_APPLICATION_INFO
        | VK_STRUCTURE_TYPE_INSTANCE_CREATE_INFO
        | VK_STRUCTURE_TYPE_MAX_ENUM => {
            warn!("sType {:?} is not a chainable structure", stype);
            return Err(ChainError::UnrecognizedKind(tag));
        }
    };

    staged.commit();
    Ok(copy)
}

unsafe fn free_link(link: *mut c_void) {
    use VkStructureType::*;

    let tag = chain_tag(link);
    let stype = match conv::map_structure_type(tag) {
        Some(stype) => stype,
        None => {
            // Clones only ever contain recognized links.
            error!("refusing to free chain link with unrecognized sType {}", tag);
            return;
        }
    };

    match stype {
        VK_STRUCTURE_TYPE_PHYSICAL_DEVICE_FEATURES_2 => {
            free_value(link as *mut VkPhysicalDeviceFeatures2);
        }
        VK_STRUCTURE_TYPE_DEVICE_GROUP_DEVICE_CREATE_INFO => {
            let s = &*(link as *const VkDeviceGroupDeviceCreateInfo);
            free_array(
                s.pPhysicalDevices as *mut VkPhysicalDevice,
                s.physicalDeviceCount as usize,
            );
            free_value(link as *mut VkDeviceGroupDeviceCreateInfo);
        }
        VK_STRUCTURE_TYPE_DEBUG_UTILS_MESSENGER_CREATE_INFO_EXT => {
            free_value(link as *mut VkDebugUtilsMessengerCreateInfoEXT);
        }
        VK_STRUCTURE_TYPE_VALIDATION_FEATURES_EXT => {
            let s = &*(link as *const VkValidationFeaturesEXT);
            free_array(
                s.pEnabledValidationFeatures as *mut VkValidationFeatureEnableEXT,
                s.enabledValidationFeatureCount as usize,
            );
            free_array(
                s.pDisabledValidationFeatures as *mut VkValidationFeatureDisableEXT,
                s.disabledValidationFeatureCount as usize,
            );
            free_value(link as *mut VkValidationFeaturesEXT);
        }
        VK_STRUCTURE_TYPE_DEBUG_UTILS_LABEL_EXT => {
            let s = &*(link as *const VkDebugUtilsLabelEXT);
            free_cstr(s.pLabelName as *mut c_char);
            free_value(link as *mut VkDebugUtilsLabelEXT);
        }
        VK_STRUCTURE_TYPE_DEBUG_UTILS_OBJECT_NAME_INFO_EXT => {
            let s = &*(link as *const VkDebugUtilsObjectNameInfoEXT);
            free_cstr(s.pObjectName as *mut c_char);
            free_value(link as *mut VkDebugUtilsObjectNameInfoEXT);
        }
        VK_STRUCTURE_TYPE_DEBUG_UTILS_MESSENGER_CALLBACK_DATA_EXT => {
            free_callback_data_payload(&*(link as *const VkDebugUtilsMessengerCallbackDataEXT));
            free_value(link as *mut VkDebugUtilsMessengerCallbackDataEXT);
        }
        VK_STRUCTURE_TYPE_LAYER_SETTINGS_CREATE_INFO_EXT => {
            let s = &*(link as *const VkLayerSettingsCreateInfoEXT);
            free_layer_settings(s.pSettings, s.settingCount);
            free_value(link as *mut VkLayerSettingsCreateInfoEXT);
        }
        VK_STRUCTURE_TYPE_APPLICATION_INFO
        | VK_STRUCTURE_TYPE_INSTANCE_CREATE_INFO
        | VK_STRUCTURE_TYPE_MAX_ENUM => {
            error!("chain link with non-chainable sType {:?}", stype);
        }
    }
}

// Array elements are roots of their own chains, so unlike a chain link a
// label copied here keeps a deep copy of its `pNext`.
unsafe fn clone_label_array(
    src: *const VkDebugUtilsLabelEXT,
    count: u32,
    staged: &mut Staged,
) -> Result<*const VkDebugUtilsLabelEXT, ChainError> {
    if src.is_null() || count == 0 {
        return Ok(ptr::null());
    }
    let dst = staged.array_uninit::<VkDebugUtilsLabelEXT>(count as usize)?;
    for i in 0..count as usize {
        let label = &*src.add(i);
        let copy = VkDebugUtilsLabelEXT {
            pNext: staged.chain(label.pNext)?,
            pLabelName: staged.cstr(label.pLabelName)?,
            ..*label
        };
        ptr::write(dst.add(i), copy);
    }
    Ok(dst)
}

unsafe fn free_label_array(array: *const VkDebugUtilsLabelEXT, count: u32) {
    if array.is_null() || count == 0 {
        return;
    }
    for i in 0..count as usize {
        let label = &*array.add(i);
        free_pnext_chain(label.pNext as *mut c_void);
        free_cstr(label.pLabelName as *mut c_char);
    }
    free_array(array as *mut VkDebugUtilsLabelEXT, count as usize);
}

unsafe fn clone_object_array(
    src: *const VkDebugUtilsObjectNameInfoEXT,
    count: u32,
    staged: &mut Staged,
) -> Result<*const VkDebugUtilsObjectNameInfoEXT, ChainError> {
    if src.is_null() || count == 0 {
        return Ok(ptr::null());
    }
    let dst = staged.array_uninit::<VkDebugUtilsObjectNameInfoEXT>(count as usize)?;
    for i in 0..count as usize {
        let object = &*src.add(i);
        let copy = VkDebugUtilsObjectNameInfoEXT {
            pNext: staged.chain(object.pNext)?,
            pObjectName: staged.cstr(object.pObjectName)?,
            ..*object
        };
        ptr::write(dst.add(i), copy);
    }
    Ok(dst)
}

unsafe fn free_object_array(array: *const VkDebugUtilsObjectNameInfoEXT, count: u32) {
    if array.is_null() || count == 0 {
        return;
    }
    for i in 0..count as usize {
        let object = &*array.add(i);
        free_pnext_chain(object.pNext as *mut c_void);
        free_cstr(object.pObjectName as *mut c_char);
    }
    free_array(array as *mut VkDebugUtilsObjectNameInfoEXT, count as usize);
}

unsafe fn clone_callback_data_payload(
    src: &VkDebugUtilsMessengerCallbackDataEXT,
    staged: &mut Staged,
) -> Result<VkDebugUtilsMessengerCallbackDataEXT, ChainError> {
    Ok(VkDebugUtilsMessengerCallbackDataEXT {
        pNext: ptr::null(),
        pMessageIdName: staged.cstr(src.pMessageIdName)?,
        pMessage: staged.cstr(src.pMessage)?,
        pQueueLabels: clone_label_array(src.pQueueLabels, src.queueLabelCount, staged)?,
        pCmdBufLabels: clone_label_array(src.pCmdBufLabels, src.cmdBufLabelCount, staged)?,
        pObjects: clone_object_array(src.pObjects, src.objectCount, staged)?,
        ..*src
    })
}

unsafe fn free_callback_data_payload(data: &VkDebugUtilsMessengerCallbackDataEXT) {
    free_cstr(data.pMessageIdName as *mut c_char);
    free_cstr(data.pMessage as *mut c_char);
    free_label_array(data.pQueueLabels, data.queueLabelCount);
    free_label_array(data.pCmdBufLabels, data.cmdBufLabelCount);
    free_object_array(data.pObjects, data.objectCount);
}

unsafe fn clone_layer_settings(
    src: *const VkLayerSettingEXT,
    count: u32,
    staged: &mut Staged,
) -> Result<*const VkLayerSettingEXT, ChainError> {
    if src.is_null() || count == 0 {
        return Ok(ptr::null());
    }
    let dst = staged.array_uninit::<VkLayerSettingEXT>(count as usize)?;
    for i in 0..count as usize {
        let setting = &*src.add(i);
        let values = clone_setting_values(setting, staged)?;
        let copy = VkLayerSettingEXT {
            pLayerName: staged.cstr(setting.pLayerName)?,
            pSettingName: staged.cstr(setting.pSettingName)?,
            pValues: values,
            ..*setting
        };
        ptr::write(dst.add(i), copy);
    }
    Ok(dst)
}

unsafe fn clone_setting_values(
    setting: &VkLayerSettingEXT,
    staged: &mut Staged,
) -> Result<*const c_void, ChainError> {
    if setting.pValues.is_null() || setting.valueCount == 0 {
        return Ok(ptr::null());
    }
    let count = setting.valueCount as usize;
    if let VkLayerSettingTypeEXT::VK_LAYER_SETTING_TYPE_STRING_EXT = setting.type_ {
        let dst = staged.array_uninit::<*const c_char>(count)?;
        let values = setting.pValues as *const *const c_char;
        for i in 0..count {
            let copy = staged.cstr(*values.add(i))?;
            ptr::write(dst.add(i), copy);
        }
        Ok(dst as *const c_void)
    } else {
        let size = conv::layer_setting_value_size(setting.type_);
        let bytes = staged.bytes(setting.pValues as *const u8, size * count, size)?;
        Ok(bytes as *const c_void)
    }
}

unsafe fn free_layer_settings(settings: *const VkLayerSettingEXT, count: u32) {
    if settings.is_null() || count == 0 {
        return;
    }
    for i in 0..count as usize {
        let setting = &*settings.add(i);
        free_cstr(setting.pLayerName as *mut c_char);
        free_cstr(setting.pSettingName as *mut c_char);
        if setting.pValues.is_null() || setting.valueCount == 0 {
            continue;
        }
        let value_count = setting.valueCount as usize;
        if let VkLayerSettingTypeEXT::VK_LAYER_SETTING_TYPE_STRING_EXT = setting.type_ {
            let values = setting.pValues as *mut *mut c_char;
            for j in 0..value_count {
                free_cstr(*values.add(j));
            }
            free_array(values, value_count);
        } else {
            let size = conv::layer_setting_value_size(setting.type_);
            free_raw(
                setting.pValues as *mut u8,
                Layout::from_size_align(size * value_count, size).unwrap(),
            );
        }
    }
    free_array(settings as *mut VkLayerSettingEXT, count as usize);
}

/// Deep-copies an instance create-info, including its application info,
/// both name arrays and the extension chain.
pub unsafe fn clone_instance_create_info(
    info: *const VkInstanceCreateInfo,
) -> Result<*mut VkInstanceCreateInfo, ChainError> {
    if info.is_null() {
        return Ok(ptr::null_mut());
    }
    let src = &*info;
    let mut staged = Staged::new();

    let app_info = if src.pApplicationInfo.is_null() {
        ptr::null()
    } else {
        let app = &*src.pApplicationInfo;
        let copy = VkApplicationInfo {
            pNext: staged.chain(app.pNext)?,
            pApplicationName: staged.cstr(app.pApplicationName)?,
            pEngineName: staged.cstr(app.pEngineName)?,
            ..*app
        };
        staged.value(copy)? as *const VkApplicationInfo
    };

    let layers = clone_cstr_array(src.ppEnabledLayerNames, src.enabledLayerCount, &mut staged)?;
    let extensions = clone_cstr_array(
        src.ppEnabledExtensionNames,
        src.enabledExtensionCount,
        &mut staged,
    )?;

    let copy = alloc_value(VkInstanceCreateInfo {
        pNext: staged.chain(src.pNext)?,
        pApplicationInfo: app_info,
        ppEnabledLayerNames: layers,
        ppEnabledExtensionNames: extensions,
        ..*src
    })?;
    staged.commit();
    Ok(copy)
}

/// Releases a clone made by `clone_instance_create_info`.
pub unsafe fn free_instance_create_info(info: *mut VkInstanceCreateInfo) {
    if info.is_null() {
        return;
    }
    let src = &*info;
    free_pnext_chain(src.pNext as *mut c_void);
    if !src.pApplicationInfo.is_null() {
        let app = &*src.pApplicationInfo;
        free_pnext_chain(app.pNext as *mut c_void);
        free_cstr(app.pApplicationName as *mut c_char);
        free_cstr(app.pEngineName as *mut c_char);
        free_value(src.pApplicationInfo as *mut VkApplicationInfo);
    }
    free_cstr_array(src.ppEnabledLayerNames, src.enabledLayerCount);
    free_cstr_array(src.ppEnabledExtensionNames, src.enabledExtensionCount);
    free_value(info);
}

/// Deep-copies a debug-utils callback data structure so a message can be
/// kept past the callback's return.
pub unsafe fn clone_debug_utils_callback_data(
    data: *const VkDebugUtilsMessengerCallbackDataEXT,
) -> Result<*mut VkDebugUtilsMessengerCallbackDataEXT, ChainError> {
    if data.is_null() {
        return Ok(ptr::null_mut());
    }
    let src = &*data;
    let mut staged = Staged::new();
    let mut value = clone_callback_data_payload(src, &mut staged)?;
    value.pNext = staged.chain(src.pNext)?;
    let copy = alloc_value(value)?;
    staged.commit();
    Ok(copy)
}

/// Releases a clone made by `clone_debug_utils_callback_data`.
pub unsafe fn free_debug_utils_callback_data(data: *mut VkDebugUtilsMessengerCallbackDataEXT) {
    if data.is_null() {
        return;
    }
    free_pnext_chain((*data).pNext as *mut c_void);
    free_callback_data_payload(&*data);
    free_value(data);
}

unsafe fn clone_cstr_array(
    src: *const *const c_char,
    count: u32,
    staged: &mut Staged,
) -> Result<*const *const c_char, ChainError> {
    if src.is_null() || count == 0 {
        return Ok(ptr::null());
    }
    let dst = staged.array_uninit::<*const c_char>(count as usize)?;
    for i in 0..count as usize {
        let copy = staged.cstr(*src.add(i))?;
        ptr::write(dst.add(i), copy);
    }
    Ok(dst as *const *const c_char)
}

unsafe fn free_cstr_array(array: *const *const c_char, count: u32) {
    if array.is_null() || count == 0 {
        return;
    }
    for i in 0..count as usize {
        free_cstr(*array.add(i) as *mut c_char);
    }
    free_array(array as *mut *const c_char, count as usize);
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::Ordering;
    use std::sync::{Mutex, MutexGuard};

    // The allocation counter and budget are process-wide, so tests that
    // assert on them cannot overlap.
    static SERIAL: Mutex<()> = Mutex::new(());

    pub fn serial() -> MutexGuard<'static, ()> {
        SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_allocation_budget(budget: isize) {
        super::ALLOCATION_BUDGET.store(budget, Ordering::SeqCst);
    }

    pub fn reset_allocation_budget() {
        super::ALLOCATION_BUDGET.store(isize::MAX, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;
    use std::mem;

    use VkStructureType::*;

    fn features2(next: *mut c_void) -> VkPhysicalDeviceFeatures2 {
        VkPhysicalDeviceFeatures2 {
            sType: VK_STRUCTURE_TYPE_PHYSICAL_DEVICE_FEATURES_2,
            pNext: next,
            features: unsafe { mem::zeroed() },
        }
    }

    unsafe fn chain_tags(head: *const c_void) -> Vec<u32> {
        let mut tags = Vec::new();
        let mut link = head;
        while !link.is_null() {
            tags.push(chain_tag(link));
            link = chain_next(link);
        }
        tags
    }

    #[test]
    fn null_chain_round_trip() {
        let _ = env_logger::builder().is_test(true).try_init();
        let _guard = testing::serial();
        let baseline = live_allocations();

        let head = unsafe { clone_pnext_chain(ptr::null()) }.unwrap();
        assert!(head.is_null());
        unsafe { free_pnext_chain(head) };
        assert_eq!(live_allocations(), baseline);
    }

    #[test]
    fn single_scalar_link_round_trip() {
        let _guard = testing::serial();
        let baseline = live_allocations();

        let mut src = features2(ptr::null_mut());
        src.features.robustBufferAccess = VK_TRUE;
        src.features.samplerAnisotropy = VK_TRUE;

        let head = unsafe { clone_pnext_chain(&src as *const _ as *const c_void) }.unwrap();
        assert!(!head.is_null());
        {
            let copy = unsafe { &*(head as *const VkPhysicalDeviceFeatures2) };
            assert_eq!(copy.sType, VK_STRUCTURE_TYPE_PHYSICAL_DEVICE_FEATURES_2);
            assert!(copy.pNext.is_null());
            assert_eq!(copy.features.robustBufferAccess, VK_TRUE);
            assert_eq!(copy.features.samplerAnisotropy, VK_TRUE);
            assert_eq!(copy.features.sparseBinding, VK_FALSE);
        }

        // The copy does not see later writes to the original.
        src.features.robustBufferAccess = VK_FALSE;
        let copy = unsafe { &*(head as *const VkPhysicalDeviceFeatures2) };
        assert_eq!(copy.features.robustBufferAccess, VK_TRUE);

        unsafe { free_pnext_chain(head) };
        assert_eq!(live_allocations(), baseline);
    }

    #[test]
    fn array_payloads_are_reallocated() {
        let _guard = testing::serial();
        let baseline = live_allocations();

        use VkValidationFeatureEnableEXT::*;
        let mut tail = features2(ptr::null_mut());
        let enables = vec![
            VK_VALIDATION_FEATURE_ENABLE_GPU_ASSISTED_EXT,
            VK_VALIDATION_FEATURE_ENABLE_BEST_PRACTICES_EXT,
            VK_VALIDATION_FEATURE_ENABLE_DEBUG_PRINTF_EXT,
        ];
        let src = VkValidationFeaturesEXT {
            sType: VK_STRUCTURE_TYPE_VALIDATION_FEATURES_EXT,
            pNext: &mut tail as *mut _ as *const c_void,
            enabledValidationFeatureCount: enables.len() as u32,
            pEnabledValidationFeatures: enables.as_ptr(),
            disabledValidationFeatureCount: 0,
            pDisabledValidationFeatures: ptr::null(),
        };

        let head = unsafe { clone_pnext_chain(&src as *const _ as *const c_void) }.unwrap();
        assert_eq!(
            unsafe { chain_tags(head) },
            vec![
                VK_STRUCTURE_TYPE_VALIDATION_FEATURES_EXT as u32,
                VK_STRUCTURE_TYPE_PHYSICAL_DEVICE_FEATURES_2 as u32,
            ],
        );

        let first = unsafe { &*(head as *const VkValidationFeaturesEXT) };
        assert_eq!(first.enabledValidationFeatureCount, 3);
        assert_ne!(first.pEnabledValidationFeatures, enables.as_ptr());
        assert!(first.pDisabledValidationFeatures.is_null());

        // Writing into the copy's array leaves the source untouched, and
        // dropping the source leaves the copy readable.
        unsafe {
            *(first.pEnabledValidationFeatures as *mut VkValidationFeatureEnableEXT) =
                VK_VALIDATION_FEATURE_ENABLE_SYNCHRONIZATION_VALIDATION_EXT;
        }
        assert_eq!(enables[0], VK_VALIDATION_FEATURE_ENABLE_GPU_ASSISTED_EXT);
        drop(enables);

        let copied =
            unsafe { std::slice::from_raw_parts(first.pEnabledValidationFeatures, 3) };
        assert_eq!(
            copied,
            &[
                VK_VALIDATION_FEATURE_ENABLE_SYNCHRONIZATION_VALIDATION_EXT,
                VK_VALIDATION_FEATURE_ENABLE_BEST_PRACTICES_EXT,
                VK_VALIDATION_FEATURE_ENABLE_DEBUG_PRINTF_EXT,
            ],
        );

        unsafe { free_pnext_chain(head) };
        assert_eq!(live_allocations(), baseline);
    }

    #[test]
    fn string_payloads_are_reallocated() {
        let _guard = testing::serial();
        let baseline = live_allocations();

        let mut name = *b"hello\0";
        let src = VkDebugUtilsLabelEXT {
            sType: VK_STRUCTURE_TYPE_DEBUG_UTILS_LABEL_EXT,
            pNext: ptr::null(),
            pLabelName: name.as_ptr() as *const c_char,
            color: [0.0, 0.25, 0.5, 1.0],
        };

        let head = unsafe { clone_pnext_chain(&src as *const _ as *const c_void) }.unwrap();
        let copy = unsafe { &*(head as *const VkDebugUtilsLabelEXT) };
        assert_ne!(copy.pLabelName, src.pLabelName);
        assert_eq!(
            unsafe { CStr::from_ptr(copy.pLabelName) }.to_bytes(),
            b"hello",
        );
        assert_eq!(copy.color, [0.0, 0.25, 0.5, 1.0]);

        // Scribbling over the original string does not reach the copy.
        name[0] = b'y';
        assert_eq!(
            unsafe { CStr::from_ptr(copy.pLabelName) }.to_bytes(),
            b"hello",
        );

        unsafe { free_pnext_chain(head) };
        assert_eq!(live_allocations(), baseline);
    }

    #[test]
    fn unrecognized_stype_is_rejected_without_leaking() {
        let _guard = testing::serial();
        let baseline = live_allocations();

        #[repr(C)]
        struct Mystery {
            sType: u32,
            pNext: *const c_void,
            payload: u64,
        }
        let mystery = Mystery {
            sType: 0x7fff_f00d,
            pNext: ptr::null(),
            payload: 7,
        };

        // The policy holds across repeated attempts.
        for _ in 0..2 {
            let err =
                unsafe { clone_pnext_chain(&mystery as *const _ as *const c_void) }.unwrap_err();
            assert_eq!(err, ChainError::UnrecognizedKind(0x7fff_f00d));
        }

        // A recognized prefix is unwound when a later link is rejected.
        use VkValidationFeatureDisableEXT::*;
        let disables = [VK_VALIDATION_FEATURE_DISABLE_THREAD_SAFETY_EXT];
        let src = VkValidationFeaturesEXT {
            sType: VK_STRUCTURE_TYPE_VALIDATION_FEATURES_EXT,
            pNext: &mystery as *const _ as *const c_void,
            enabledValidationFeatureCount: 0,
            pEnabledValidationFeatures: ptr::null(),
            disabledValidationFeatureCount: disables.len() as u32,
            pDisabledValidationFeatures: disables.as_ptr(),
        };
        let err = unsafe { clone_pnext_chain(&src as *const _ as *const c_void) }.unwrap_err();
        assert_eq!(err, ChainError::UnrecognizedKind(0x7fff_f00d));
        assert_eq!(live_allocations(), baseline);
    }

    #[test]
    fn allocation_failure_releases_partial_clone() {
        let _guard = testing::serial();
        let baseline = live_allocations();

        use VkValidationFeatureEnableEXT::*;
        let tail = features2(ptr::null_mut());
        let name = b"queue 0\0";
        let mut label = VkDebugUtilsLabelEXT {
            sType: VK_STRUCTURE_TYPE_DEBUG_UTILS_LABEL_EXT,
            pNext: &tail as *const _ as *const c_void,
            pLabelName: name.as_ptr() as *const c_char,
            color: [1.0; 4],
        };
        let enables = [VK_VALIDATION_FEATURE_ENABLE_GPU_ASSISTED_EXT];
        let src = VkValidationFeaturesEXT {
            sType: VK_STRUCTURE_TYPE_VALIDATION_FEATURES_EXT,
            pNext: &mut label as *mut _ as *const c_void,
            enabledValidationFeatureCount: enables.len() as u32,
            pEnabledValidationFeatures: enables.as_ptr(),
            disabledValidationFeatureCount: 0,
            pDisabledValidationFeatures: ptr::null(),
        };

        // The full clone needs five allocations; fail at every point.
        for budget in 0..5 {
            testing::set_allocation_budget(budget);
            let result = unsafe { clone_pnext_chain(&src as *const _ as *const c_void) };
            testing::reset_allocation_budget();
            assert_eq!(result.unwrap_err(), ChainError::OutOfHostMemory);
            assert_eq!(live_allocations(), baseline);
        }

        testing::set_allocation_budget(5);
        let head = unsafe { clone_pnext_chain(&src as *const _ as *const c_void) }.unwrap();
        testing::reset_allocation_budget();
        unsafe { free_pnext_chain(head) };
        assert_eq!(live_allocations(), baseline);
    }

    #[test]
    fn concurrent_clones_of_different_chains() {
        let _guard = testing::serial();
        let baseline = live_allocations();

        let workers: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    let name = CString::new(format!("worker {}", i)).unwrap();
                    let src = VkDebugUtilsLabelEXT {
                        sType: VK_STRUCTURE_TYPE_DEBUG_UTILS_LABEL_EXT,
                        pNext: ptr::null(),
                        pLabelName: name.as_ptr(),
                        color: [i as f32; 4],
                    };
                    for _ in 0..16 {
                        let head = unsafe {
                            clone_pnext_chain(&src as *const _ as *const c_void)
                        }
                        .unwrap();
                        let copy = unsafe { &*(head as *const VkDebugUtilsLabelEXT) };
                        assert_eq!(
                            unsafe { CStr::from_ptr(copy.pLabelName) }.to_bytes(),
                            name.as_bytes(),
                        );
                        unsafe { free_pnext_chain(head) };
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }
        assert_eq!(live_allocations(), baseline);
    }

    #[test]
    fn layer_settings_round_trip() {
        let _guard = testing::serial();
        let baseline = live_allocations();

        let layer_name = CString::new("VK_LAYER_test_harness").unwrap();
        let log_name = CString::new("log_destination").unwrap();
        let checks_name = CString::new("extra_checks").unwrap();
        let destinations = [CString::new("stdout").unwrap(), CString::new("file").unwrap()];
        let destination_ptrs: Vec<*const c_char> =
            destinations.iter().map(|s| s.as_ptr()).collect();
        let checks = [VK_TRUE];

        use VkLayerSettingTypeEXT::*;
        let settings = [
            VkLayerSettingEXT {
                pLayerName: layer_name.as_ptr(),
                pSettingName: log_name.as_ptr(),
                type_: VK_LAYER_SETTING_TYPE_STRING_EXT,
                valueCount: destination_ptrs.len() as u32,
                pValues: destination_ptrs.as_ptr() as *const c_void,
            },
            VkLayerSettingEXT {
                pLayerName: layer_name.as_ptr(),
                pSettingName: checks_name.as_ptr(),
                type_: VK_LAYER_SETTING_TYPE_BOOL32_EXT,
                valueCount: checks.len() as u32,
                pValues: checks.as_ptr() as *const c_void,
            },
        ];
        let src = VkLayerSettingsCreateInfoEXT {
            sType: VK_STRUCTURE_TYPE_LAYER_SETTINGS_CREATE_INFO_EXT,
            pNext: ptr::null(),
            settingCount: settings.len() as u32,
            pSettings: settings.as_ptr(),
        };

        let head = unsafe { clone_pnext_chain(&src as *const _ as *const c_void) }.unwrap();
        {
            let copy = unsafe { &*(head as *const VkLayerSettingsCreateInfoEXT) };
            assert_eq!(copy.settingCount, 2);
            assert_ne!(copy.pSettings, settings.as_ptr());

            let first = unsafe { &*copy.pSettings };
            assert_ne!(first.pLayerName, layer_name.as_ptr());
            assert_eq!(
                unsafe { CStr::from_ptr(first.pLayerName) }.to_bytes(),
                b"VK_LAYER_test_harness",
            );
            assert_eq!(first.type_, VK_LAYER_SETTING_TYPE_STRING_EXT);
            assert_eq!(first.valueCount, 2);
            let values = first.pValues as *const *const c_char;
            assert_ne!(values, destination_ptrs.as_ptr());
            assert_eq!(
                unsafe { CStr::from_ptr(*values) }.to_bytes(),
                b"stdout",
            );
            assert_eq!(
                unsafe { CStr::from_ptr(*values.add(1)) }.to_bytes(),
                b"file",
            );

            let second = unsafe { &*copy.pSettings.add(1) };
            assert_eq!(second.type_, VK_LAYER_SETTING_TYPE_BOOL32_EXT);
            assert_eq!(unsafe { *(second.pValues as *const VkBool32) }, VK_TRUE);
        }

        unsafe { free_pnext_chain(head) };
        assert_eq!(live_allocations(), baseline);
    }

    #[test]
    fn instance_create_info_round_trip() {
        let _guard = testing::serial();
        let baseline = live_allocations();

        let app_name = CString::new("demo").unwrap();
        let engine_name = CString::new("safechain").unwrap();
        let app_info = VkApplicationInfo {
            sType: VK_STRUCTURE_TYPE_APPLICATION_INFO,
            pNext: ptr::null(),
            pApplicationName: app_name.as_ptr(),
            applicationVersion: 1,
            pEngineName: engine_name.as_ptr(),
            engineVersion: 2,
            apiVersion: (1 << 22) | (1 << 12),
        };

        let layers = [CString::new("VK_LAYER_KHRONOS_validation").unwrap()];
        let layer_ptrs: Vec<*const c_char> = layers.iter().map(|s| s.as_ptr()).collect();
        let extensions = [
            CString::new("VK_KHR_surface").unwrap(),
            CString::new("VK_EXT_debug_utils").unwrap(),
        ];
        let extension_ptrs: Vec<*const c_char> =
            extensions.iter().map(|s| s.as_ptr()).collect();

        let messenger = VkDebugUtilsMessengerCreateInfoEXT {
            sType: VK_STRUCTURE_TYPE_DEBUG_UTILS_MESSENGER_CREATE_INFO_EXT,
            pNext: ptr::null(),
            flags: 0,
            messageSeverity: 0x1000 | 0x100,
            messageType: 0x2,
            pfnUserCallback: None,
            pUserData: ptr::null_mut(),
        };

        let src = VkInstanceCreateInfo {
            sType: VK_STRUCTURE_TYPE_INSTANCE_CREATE_INFO,
            pNext: &messenger as *const _ as *const c_void,
            flags: 0,
            pApplicationInfo: &app_info,
            enabledLayerCount: layer_ptrs.len() as u32,
            ppEnabledLayerNames: layer_ptrs.as_ptr(),
            enabledExtensionCount: extension_ptrs.len() as u32,
            ppEnabledExtensionNames: extension_ptrs.as_ptr(),
        };

        let copy = unsafe { clone_instance_create_info(&src) }.unwrap();
        {
            let info = unsafe { &*copy };
            assert_eq!(info.sType, VK_STRUCTURE_TYPE_INSTANCE_CREATE_INFO);

            let app = unsafe { &*info.pApplicationInfo };
            assert_ne!(info.pApplicationInfo, src.pApplicationInfo);
            assert_eq!(
                unsafe { CStr::from_ptr(app.pApplicationName) }.to_bytes(),
                b"demo",
            );
            assert_eq!(
                unsafe { CStr::from_ptr(app.pEngineName) }.to_bytes(),
                b"safechain",
            );
            assert_eq!(app.engineVersion, 2);

            assert_eq!(info.enabledLayerCount, 1);
            assert_ne!(info.ppEnabledLayerNames, layer_ptrs.as_ptr());
            assert_eq!(
                unsafe { CStr::from_ptr(*info.ppEnabledLayerNames) }.to_bytes(),
                b"VK_LAYER_KHRONOS_validation",
            );
            assert_eq!(info.enabledExtensionCount, 2);
            assert_eq!(
                unsafe { CStr::from_ptr(*info.ppEnabledExtensionNames.add(1)) }.to_bytes(),
                b"VK_EXT_debug_utils",
            );

            assert_eq!(
                unsafe { chain_tags(info.pNext) },
                vec![VK_STRUCTURE_TYPE_DEBUG_UTILS_MESSENGER_CREATE_INFO_EXT as u32],
            );
        }

        unsafe { free_instance_create_info(copy) };
        assert_eq!(live_allocations(), baseline);
    }

    #[test]
    fn callback_data_round_trip() {
        let _guard = testing::serial();
        let baseline = live_allocations();

        let id_name = CString::new("VUID-vkQueueSubmit-pSubmits-02808").unwrap();
        let message = CString::new("stale descriptor bound").unwrap();
        let queue_label = CString::new("frame 31").unwrap();
        let object_name = CString::new("main queue").unwrap();

        let labels = [VkDebugUtilsLabelEXT {
            sType: VK_STRUCTURE_TYPE_DEBUG_UTILS_LABEL_EXT,
            pNext: ptr::null(),
            pLabelName: queue_label.as_ptr(),
            color: [0.5, 0.5, 0.0, 1.0],
        }];
        let objects = [VkDebugUtilsObjectNameInfoEXT {
            sType: VK_STRUCTURE_TYPE_DEBUG_UTILS_OBJECT_NAME_INFO_EXT,
            pNext: ptr::null(),
            objectType: VkObjectType::VK_OBJECT_TYPE_QUEUE,
            objectHandle: 0xdead_beef,
            pObjectName: object_name.as_ptr(),
        }];
        let src = VkDebugUtilsMessengerCallbackDataEXT {
            sType: VK_STRUCTURE_TYPE_DEBUG_UTILS_MESSENGER_CALLBACK_DATA_EXT,
            pNext: ptr::null(),
            flags: 0,
            pMessageIdName: id_name.as_ptr(),
            messageIdNumber: -1431517516,
            pMessage: message.as_ptr(),
            queueLabelCount: 1,
            pQueueLabels: labels.as_ptr(),
            cmdBufLabelCount: 0,
            pCmdBufLabels: ptr::null(),
            objectCount: 1,
            pObjects: objects.as_ptr(),
        };

        let copy = unsafe { clone_debug_utils_callback_data(&src) }.unwrap();
        {
            let data = unsafe { &*copy };
            assert_eq!(data.messageIdNumber, -1431517516);
            assert_ne!(data.pMessage, src.pMessage);
            assert_eq!(
                unsafe { CStr::from_ptr(data.pMessage) }.to_bytes(),
                b"stale descriptor bound",
            );

            let label = unsafe { &*data.pQueueLabels };
            assert_ne!(data.pQueueLabels, src.pQueueLabels);
            assert_eq!(
                unsafe { CStr::from_ptr(label.pLabelName) }.to_bytes(),
                b"frame 31",
            );

            let object = unsafe { &*data.pObjects };
            assert_eq!(object.objectType, VkObjectType::VK_OBJECT_TYPE_QUEUE);
            assert_eq!(object.objectHandle, 0xdead_beef);
            assert_eq!(
                unsafe { CStr::from_ptr(object.pObjectName) }.to_bytes(),
                b"main queue",
            );
            assert!(data.pCmdBufLabels.is_null());
        }

        unsafe { free_debug_utils_callback_data(copy) };
        assert_eq!(live_allocations(), baseline);
    }
}
