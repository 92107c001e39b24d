use super::*;

use std::mem;

/// Maps a raw `sType` value read out of a chain link onto the closed set of
/// structure types this library understands. Unknown values stay raw so
/// the caller can report them.
pub fn map_structure_type(raw: u32) -> Option<VkStructureType> {
    use VkStructureType::*;

    const KNOWN: &[VkStructureType] = &[
        VK_STRUCTURE_TYPE_APPLICATION_INFO,
        VK_STRUCTURE_TYPE_INSTANCE_CREATE_INFO,
        VK_STRUCTURE_TYPE_PHYSICAL_DEVICE_FEATURES_2,
        VK_STRUCTURE_TYPE_DEVICE_GROUP_DEVICE_CREATE_INFO,
        VK_STRUCTURE_TYPE_DEBUG_UTILS_OBJECT_NAME_INFO_EXT,
        VK_STRUCTURE_TYPE_DEBUG_UTILS_LABEL_EXT,
        VK_STRUCTURE_TYPE_DEBUG_UTILS_MESSENGER_CALLBACK_DATA_EXT,
        VK_STRUCTURE_TYPE_DEBUG_UTILS_MESSENGER_CREATE_INFO_EXT,
        VK_STRUCTURE_TYPE_VALIDATION_FEATURES_EXT,
        VK_STRUCTURE_TYPE_LAYER_SETTINGS_CREATE_INFO_EXT,
    ];

    KNOWN.iter().find(|&&stype| stype as u32 == raw).copied()
}

/// Byte width of one element of a layer setting's value array. String
/// values are stored as an array of pointers; the pointed-at strings are
/// handled separately.
pub fn layer_setting_value_size(type_: VkLayerSettingTypeEXT) -> usize {
    use VkLayerSettingTypeEXT::*;

    match type_ {
        VK_LAYER_SETTING_TYPE_BOOL32_EXT => mem::size_of::<VkBool32>(),
        VK_LAYER_SETTING_TYPE_INT32_EXT
        | VK_LAYER_SETTING_TYPE_UINT32_EXT
        | VK_LAYER_SETTING_TYPE_FLOAT32_EXT => 4,
        VK_LAYER_SETTING_TYPE_INT64_EXT
        | VK_LAYER_SETTING_TYPE_UINT64_EXT
        | VK_LAYER_SETTING_TYPE_FLOAT64_EXT => 8,
        VK_LAYER_SETTING_TYPE_STRING_EXT => {
            mem::size_of::<*const ::std::os::raw::c_char>()
        }
        VK_LAYER_SETTING_TYPE_MAX_ENUM_EXT => panic!("setting type {:?}", type_),
    }
}

pub fn result_from_chain_error(err: ChainError) -> VkResult {
    match err {
        ChainError::OutOfHostMemory => VkResult::VK_ERROR_OUT_OF_HOST_MEMORY,
        ChainError::UnrecognizedKind(_) => VkResult::VK_ERROR_EXTENSION_NOT_PRESENT,
    }
}
