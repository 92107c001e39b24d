//! Post-call validation of entry point return codes.
//!
//! A wrapper that observes a completed API call forwards the entry point's
//! name and returned code here. Anything outside the documented result set
//! for that entry point is reported as a validation error.

use super::*;

/// Documented result codes for the entry points this layer knows about,
/// or `None` for an entry point without a table.
pub fn expected_results(name: &str) -> Option<&'static [VkResult]> {
    use VkResult::*;

    let codes: &[VkResult] = match name {
        "vkCreateInstance" => &[
            VK_SUCCESS,
            VK_ERROR_OUT_OF_HOST_MEMORY,
            VK_ERROR_OUT_OF_DEVICE_MEMORY,
            VK_ERROR_INITIALIZATION_FAILED,
            VK_ERROR_LAYER_NOT_PRESENT,
            VK_ERROR_EXTENSION_NOT_PRESENT,
            VK_ERROR_INCOMPATIBLE_DRIVER,
        ],
        "vkEnumeratePhysicalDevices" => &[
            VK_SUCCESS,
            VK_INCOMPLETE,
            VK_ERROR_OUT_OF_HOST_MEMORY,
            VK_ERROR_OUT_OF_DEVICE_MEMORY,
            VK_ERROR_INITIALIZATION_FAILED,
        ],
        "vkCreateDevice" => &[
            VK_SUCCESS,
            VK_ERROR_OUT_OF_HOST_MEMORY,
            VK_ERROR_OUT_OF_DEVICE_MEMORY,
            VK_ERROR_INITIALIZATION_FAILED,
            VK_ERROR_EXTENSION_NOT_PRESENT,
            VK_ERROR_FEATURE_NOT_PRESENT,
            VK_ERROR_TOO_MANY_OBJECTS,
            VK_ERROR_DEVICE_LOST,
        ],
        "vkQueueSubmit" | "vkQueueWaitIdle" | "vkDeviceWaitIdle" => &[
            VK_SUCCESS,
            VK_ERROR_OUT_OF_HOST_MEMORY,
            VK_ERROR_OUT_OF_DEVICE_MEMORY,
            VK_ERROR_DEVICE_LOST,
        ],
        "vkAllocateMemory" => &[
            VK_SUCCESS,
            VK_ERROR_OUT_OF_HOST_MEMORY,
            VK_ERROR_OUT_OF_DEVICE_MEMORY,
            VK_ERROR_TOO_MANY_OBJECTS,
        ],
        "vkMapMemory" => &[
            VK_SUCCESS,
            VK_ERROR_OUT_OF_HOST_MEMORY,
            VK_ERROR_OUT_OF_DEVICE_MEMORY,
            VK_ERROR_MEMORY_MAP_FAILED,
        ],
        "vkWaitForFences" => &[
            VK_SUCCESS,
            VK_TIMEOUT,
            VK_ERROR_OUT_OF_HOST_MEMORY,
            VK_ERROR_OUT_OF_DEVICE_MEMORY,
            VK_ERROR_DEVICE_LOST,
        ],
        "vkGetFenceStatus" => &[
            VK_SUCCESS,
            VK_NOT_READY,
            VK_ERROR_OUT_OF_HOST_MEMORY,
            VK_ERROR_OUT_OF_DEVICE_MEMORY,
            VK_ERROR_DEVICE_LOST,
        ],
        "vkCreateGraphicsPipelines" | "vkCreateComputePipelines" => &[
            VK_SUCCESS,
            VK_ERROR_OUT_OF_HOST_MEMORY,
            VK_ERROR_OUT_OF_DEVICE_MEMORY,
            VK_ERROR_INVALID_SHADER_NV,
        ],
        "vkEndCommandBuffer" => &[
            VK_SUCCESS,
            VK_ERROR_OUT_OF_HOST_MEMORY,
            VK_ERROR_OUT_OF_DEVICE_MEMORY,
        ],
        "vkCreateSwapchainKHR" => &[
            VK_SUCCESS,
            VK_ERROR_OUT_OF_HOST_MEMORY,
            VK_ERROR_OUT_OF_DEVICE_MEMORY,
            VK_ERROR_DEVICE_LOST,
            VK_ERROR_SURFACE_LOST_KHR,
            VK_ERROR_NATIVE_WINDOW_IN_USE_KHR,
            VK_ERROR_INITIALIZATION_FAILED,
        ],
        "vkAcquireNextImageKHR" => &[
            VK_SUCCESS,
            VK_TIMEOUT,
            VK_NOT_READY,
            VK_SUBOPTIMAL_KHR,
            VK_ERROR_OUT_OF_HOST_MEMORY,
            VK_ERROR_OUT_OF_DEVICE_MEMORY,
            VK_ERROR_DEVICE_LOST,
            VK_ERROR_OUT_OF_DATE_KHR,
            VK_ERROR_SURFACE_LOST_KHR,
        ],
        "vkQueuePresentKHR" => &[
            VK_SUCCESS,
            VK_SUBOPTIMAL_KHR,
            VK_ERROR_OUT_OF_HOST_MEMORY,
            VK_ERROR_OUT_OF_DEVICE_MEMORY,
            VK_ERROR_DEVICE_LOST,
            VK_ERROR_OUT_OF_DATE_KHR,
            VK_ERROR_SURFACE_LOST_KHR,
        ],
        _ => return None,
    };
    Some(codes)
}

/// Checks a captured return code against the entry point's documented
/// set. Entry points without a table are accepted; there is nothing to
/// check them against.
pub fn record_result(name: &str, result: VkResult) -> bool {
    match expected_results(name) {
        Some(codes) if codes.contains(&result) => true,
        Some(_) => {
            error!(
                "{} returned {:?}, which is not a documented result code",
                name, result,
            );
            false
        }
        None => {
            trace!("no result table for {}", name);
            true
        }
    }
}
